use log::warn;

use crate::Error;

const BITS_IN_BYTE: u32 = 8;

/// Free-space tracking, one bit per block, most significant bit first
/// within each byte. A set bit means the block is owned by some chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    mapping: Vec<u8>,
    num_blocks: u32,
    /// Index most recently examined; allocation resumes scanning here.
    cursor: u32,
}

impl Bitmap {
    pub fn new(num_blocks: u32) -> Self {
        assert!(num_blocks > 0, "bitmap must track at least one block");
        Self {
            mapping: vec![0; Self::size(num_blocks)],
            num_blocks,
            cursor: 0,
        }
    }

    /// Bytes occupied by the on-disk mapping for `num_blocks` blocks.
    pub fn size(num_blocks: u32) -> usize {
        (((num_blocks - 1) / BITS_IN_BYTE) + 1) as usize
    }

    pub fn num_blocks(&self) -> u32 {
        self.num_blocks
    }

    /// Occupancy of block `index`.
    pub fn get(&self, index: u32) -> bool {
        let row = (index / BITS_IN_BYTE) as usize;
        let mask = 0x80u8 >> (index % BITS_IN_BYTE);
        self.mapping[row] & mask != 0
    }

    fn set(&mut self, index: u32, value: bool) {
        let row = (index / BITS_IN_BYTE) as usize;
        let mask = 0x80u8 >> (index % BITS_IN_BYTE);
        if value {
            self.mapping[row] |= mask;
        } else {
            self.mapping[row] &= !mask;
        }
    }

    /// Claim the first free block at or after the cursor, wrapping once
    /// around the whole map. A full map is a clean failure, not a hang.
    pub fn allocate(&mut self) -> Result<u32, Error> {
        for step in 0..self.num_blocks {
            let index = ((self.cursor as u64 + step as u64) % self.num_blocks as u64) as u32;
            if !self.get(index) {
                self.set(index, true);
                self.cursor = index;
                return Ok(index);
            }
        }
        Err(Error::OutOfSpace)
    }

    /// Release block `index`. Releasing an already-free block is tolerated.
    pub fn free(&mut self, index: u32) {
        assert!(index < self.num_blocks, "block index out of range");
        if self.get(index) {
            self.set(index, false);
        } else {
            warn!("already freed block {index} passed to free");
        }
    }

    /// Raw mapping bytes, exactly as stored on disk.
    pub fn as_bytes(&self) -> &[u8] {
        &self.mapping
    }

    /// Rebuild from on-disk mapping bytes. The cursor restarts at zero.
    pub fn from_bytes(bytes: &[u8], num_blocks: u32) -> Result<Self, Error> {
        if num_blocks == 0 || bytes.len() < Self::size(num_blocks) {
            return Err(Error::MalformedStore(format!(
                "bitmap needs {} bytes for {num_blocks} blocks, got {}",
                Self::size(num_blocks),
                bytes.len()
            )));
        }
        Ok(Self {
            mapping: bytes[..Self::size(num_blocks)].to_vec(),
            num_blocks,
            cursor: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Bitmap;
    use crate::Error;

    #[test]
    fn allocate_ascending() {
        let mut bmp = Bitmap::new(16);
        assert_eq![bmp.allocate().unwrap(), 0];
        assert_eq![bmp.allocate().unwrap(), 1];
        assert_eq![bmp.allocate().unwrap(), 2];
        assert![bmp.get(0) && bmp.get(1) && bmp.get(2)];
        assert![!bmp.get(3)];
    }

    #[test]
    fn free_and_reuse() {
        let mut bmp = Bitmap::new(4);
        for _ in 0..4 {
            bmp.allocate().unwrap();
        }
        bmp.free(1);
        assert_eq![bmp.allocate().unwrap(), 1];
    }

    #[test]
    fn double_free_is_tolerated() {
        let mut bmp = Bitmap::new(4);
        bmp.allocate().unwrap();
        bmp.free(0);
        bmp.free(0);
        assert![!bmp.get(0)];
    }

    #[test]
    fn exhaustion() {
        let mut bmp = Bitmap::new(3);
        for _ in 0..3 {
            bmp.allocate().unwrap();
        }
        assert![matches!(bmp.allocate(), Err(Error::OutOfSpace))];
    }

    #[test]
    fn wraps_around_cursor() {
        let mut bmp = Bitmap::new(4);
        for _ in 0..4 {
            bmp.allocate().unwrap();
        }
        // Cursor rests at 3; freeing 0 forces a wrap to find it.
        bmp.free(0);
        assert_eq![bmp.allocate().unwrap(), 0];
    }

    #[test]
    fn mapping_is_msb_first() {
        let mut bmp = Bitmap::new(9);
        bmp.allocate().unwrap();
        assert_eq![bmp.as_bytes(), &[0x80, 0x00]];
        let loaded = Bitmap::from_bytes(bmp.as_bytes(), 9).unwrap();
        assert![loaded.get(0)];
        assert![!loaded.get(8)];
    }
}
