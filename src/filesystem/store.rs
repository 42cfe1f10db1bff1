use std::fmt::Debug;
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::structs::Superblock;
use crate::Error;

pub trait BlockDevice: Read + Write + Seek + Debug {}

impl BlockDevice for std::fs::File {}

/// Single owner of the backing device. Metadata travels through staged
/// buffers written in one positioned write; file content moves block by
/// block as a bounded stream between the device and an outside reader or
/// writer. The device is flushed whenever access switches from writing to
/// positioned reads, so stale buffered bytes are never observed.
#[derive(Debug)]
pub struct BackingStore {
    device: Box<dyn BlockDevice>,
}

impl BackingStore {
    pub fn new(device: Box<dyn BlockDevice>) -> Self {
        Self { device }
    }

    pub fn into_device(self) -> Box<dyn BlockDevice> {
        self.device
    }

    /// Write the serialized header region (superblock + FAT + bitmap) at the
    /// start of the store in one positioned write.
    pub fn write_header(&mut self, header: &[u8]) -> Result<(), Error> {
        self.device.seek(SeekFrom::Start(0))?;
        self.device.write_all(header)?;
        self.device.flush()?;
        Ok(())
    }

    /// Read `len` header bytes from the start of the store.
    pub fn read_header(&mut self, len: usize) -> Result<Vec<u8>, Error> {
        self.device.seek(SeekFrom::Start(0))?;
        let mut buffer = vec![0u8; len];
        self.device.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Overwrite one data block. `data` shorter than a block is zero-padded,
    /// so a later whole-block read always succeeds.
    pub fn write_block(
        &mut self,
        superblock: &Superblock,
        index: u32,
        data: &[u8],
    ) -> Result<(), Error> {
        assert!(data.len() <= superblock.block_size as usize);
        self.device
            .seek(SeekFrom::Start(superblock.block_position(index)))?;
        self.device.write_all(data)?;
        let padding = superblock.block_size as usize - data.len();
        if padding > 0 {
            self.device.write_all(&vec![0u8; padding])?;
        }
        self.device.flush()?;
        Ok(())
    }

    /// Read one whole data block into `buf`.
    pub fn read_block(
        &mut self,
        superblock: &Superblock,
        index: u32,
        buf: &mut [u8],
    ) -> Result<(), Error> {
        assert!(buf.len() == superblock.block_size as usize);
        self.device.flush()?;
        self.device
            .seek(SeekFrom::Start(superblock.block_position(index)))?;
        self.device.read_exact(buf)?;
        Ok(())
    }

    /// Stream up to `len` bytes from `src` into data block `index`, without
    /// buffering the transfer through an intermediate whole-file copy.
    /// Returns the byte count actually moved.
    pub fn write_block_from(
        &mut self,
        superblock: &Superblock,
        index: u32,
        src: &mut dyn Read,
        len: u32,
    ) -> Result<u64, Error> {
        assert!(len <= superblock.block_size);
        self.device
            .seek(SeekFrom::Start(superblock.block_position(index)))?;
        let written = io::copy(&mut src.take(len as u64), &mut self.device)?;
        self.device.flush()?;
        Ok(written)
    }

    /// Stream `len` bytes of data block `index` into `dst`.
    pub fn copy_block_to(
        &mut self,
        superblock: &Superblock,
        index: u32,
        len: u32,
        dst: &mut dyn Write,
    ) -> Result<u64, Error> {
        assert!(len <= superblock.block_size);
        self.device.flush()?;
        self.device
            .seek(SeekFrom::Start(superblock.block_position(index)))?;
        let device: &mut dyn BlockDevice = &mut *self.device;
        let copied = io::copy(&mut device.take(len as u64), dst)?;
        if copied != len as u64 {
            return Err(Error::MalformedStore(format!(
                "block {index} ended {} bytes early",
                len as u64 - copied
            )));
        }
        Ok(copied)
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.device.flush()?;
        Ok(())
    }
}
