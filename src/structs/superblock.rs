use super::{Bitmap, SUPERBLOCK_SIZE};
use crate::Error;

/// Fixed header of the backing store. Both parameters are chosen at creation
/// time and never change for the life of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Superblock {
    pub block_size: u32,
    pub blocks_num: u32,
}

impl Superblock {
    pub fn new(blocks_num: u32, block_size: u32) -> Self {
        assert!(blocks_num > 0, "store must hold at least one block");
        assert!(
            block_size.is_power_of_two() && (512..=8192).contains(&block_size),
            "block size must be a power of two in 512..=8192"
        );
        Self {
            block_size,
            blocks_num,
        }
    }

    /// Byte offset where block 0's data begins: superblock, FAT table,
    /// then bitmap mapping.
    pub fn blocks_offset(&self) -> u64 {
        SUPERBLOCK_SIZE as u64
            + 4 * self.blocks_num as u64
            + Bitmap::size(self.blocks_num) as u64
    }

    /// Byte position of a data block inside the backing store.
    pub fn block_position(&self, index: u32) -> u64 {
        self.blocks_offset() + index as u64 * self.block_size as u64
    }

    /// Full backing store size: header region plus data region.
    pub fn total_size(&self) -> u64 {
        self.blocks_offset() + self.blocks_num as u64 * self.block_size as u64
    }

    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize, Error> {
        if buf.len() < SUPERBLOCK_SIZE {
            return Err(Error::InvariantViolation(
                "superblock needs an 8-byte buffer".into(),
            ));
        }
        buf[0..4].copy_from_slice(&self.block_size.to_le_bytes());
        buf[4..8].copy_from_slice(&self.blocks_num.to_le_bytes());
        Ok(SUPERBLOCK_SIZE)
    }

    pub fn load(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < SUPERBLOCK_SIZE {
            return Err(Error::MalformedStore("superblock header truncated".into()));
        }
        let block_size = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let blocks_num = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
        if blocks_num == 0 || block_size == 0 {
            return Err(Error::MalformedStore(format!(
                "superblock claims {blocks_num} blocks of {block_size} bytes"
            )));
        }
        Ok(Self {
            block_size,
            blocks_num,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Superblock;

    #[test]
    fn geometry() {
        let sb = Superblock::new(64, 512);
        // 8 header + 256 FAT + 8 bitmap bytes
        assert_eq![sb.blocks_offset(), 272];
        assert_eq![sb.block_position(0), 272];
        assert_eq![sb.block_position(3), 272 + 3 * 512];
        assert_eq![sb.total_size(), 272 + 64 * 512];
    }

    #[test]
    fn header_roundtrip() {
        let sb = Superblock::new(1024, 4096);
        let mut buf = [0u8; 8];
        sb.serialize(&mut buf).unwrap();
        assert_eq![Superblock::load(&buf).unwrap(), sb];
    }

    #[test]
    fn rejects_zeroed_header() {
        assert![Superblock::load(&[0u8; 8]).is_err()];
    }
}
