use log::debug;

use super::Bitmap;
use crate::Error;

/// One slot of the allocation table. On disk a terminal block references
/// itself; in memory the two cases are kept apart so a length-one chain is
/// never mistaken for a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatEntry {
    Next(u32),
    Terminal,
}

/// File allocation table: every block maps to the next block of its owning
/// chain. Owns the free-space bitmap so allocation and linkage stay in step.
#[derive(Debug, Clone)]
pub struct Fat {
    entries: Vec<FatEntry>,
    bitmap: Bitmap,
}

impl Fat {
    /// Build a table where every block is its own one-block terminated chain.
    pub fn new(length: u32) -> Self {
        Self {
            entries: vec![FatEntry::Terminal; length as usize],
            bitmap: Bitmap::new(length),
        }
    }

    pub fn len(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: u32) -> FatEntry {
        self.entries[index as usize]
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Start a new chain: one allocated, self-terminated block.
    pub fn add_file(&mut self) -> Result<u32, Error> {
        let head = self.bitmap.allocate()?;
        self.entries[head as usize] = FatEntry::Terminal;
        debug!("new chain at block {head}");
        Ok(head)
    }

    /// Grow the chain starting at `head` by one block and return it. The old
    /// terminal is redirected to the new block, which becomes the terminal.
    pub fn add_block(&mut self, head: u32) -> Result<u32, Error> {
        let tail = self.tail(head)?;
        let block = self.bitmap.allocate()?;
        self.entries[tail as usize] = FatEntry::Next(block);
        self.entries[block as usize] = FatEntry::Terminal;
        debug!("chain {head}: appended block {block} after {tail}");
        Ok(block)
    }

    /// Free every block of the chain starting at `head`, terminal included.
    /// Freed slots revert to one-block terminated chains.
    pub fn remove_file(&mut self, head: u32) -> Result<(), Error> {
        for block in self.chain_blocks(head)? {
            self.entries[block as usize] = FatEntry::Terminal;
            self.bitmap.free(block);
        }
        debug!("removed chain at block {head}");
        Ok(())
    }

    /// All blocks of a chain, in traversal order. Walks are bounded by the
    /// table length; a longer walk means the table references a cycle.
    pub fn chain_blocks(&self, head: u32) -> Result<Vec<u32>, Error> {
        if head >= self.len() {
            return Err(Error::MalformedStore(format!(
                "chain head {head} out of range"
            )));
        }
        let mut blocks = Vec::new();
        let mut current = head;
        loop {
            blocks.push(current);
            if blocks.len() > self.entries.len() {
                return Err(Error::MalformedStore(format!(
                    "chain at block {head} exceeds table length"
                )));
            }
            match self.entries[current as usize] {
                FatEntry::Terminal => return Ok(blocks),
                FatEntry::Next(next) => current = next,
            }
        }
    }

    fn tail(&self, head: u32) -> Result<u32, Error> {
        Ok(*self
            .chain_blocks(head)?
            .last()
            .expect("a chain holds at least its head"))
    }

    /// Bytes occupied by the serialized table and bitmap for `length` blocks.
    pub fn size(length: u32) -> usize {
        4 * length as usize + Bitmap::size(length)
    }

    /// Write the table (one little-endian u32 per block, terminals as
    /// self-references) followed by the bitmap mapping into `buf`.
    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let needed = Self::size(self.len());
        if buf.len() < needed {
            return Err(Error::InvariantViolation(format!(
                "serialize buffer holds {} bytes, FAT needs {needed}",
                buf.len()
            )));
        }
        for (i, entry) in self.entries.iter().enumerate() {
            let value = match entry {
                FatEntry::Next(next) => *next,
                FatEntry::Terminal => i as u32,
            };
            buf[4 * i..4 * i + 4].copy_from_slice(&value.to_le_bytes());
        }
        let table = 4 * self.entries.len();
        buf[table..needed].copy_from_slice(self.bitmap.as_bytes());
        Ok(needed)
    }

    /// Rebuild table and bitmap from their on-disk form.
    pub fn load(bytes: &[u8], length: u32) -> Result<Self, Error> {
        if bytes.len() < Self::size(length) {
            return Err(Error::MalformedStore(format!(
                "FAT region needs {} bytes for {length} blocks, got {}",
                Self::size(length),
                bytes.len()
            )));
        }
        let mut entries = Vec::with_capacity(length as usize);
        for i in 0..length as usize {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(&bytes[4 * i..4 * i + 4]);
            let value = u32::from_le_bytes(raw);
            if value == i as u32 {
                entries.push(FatEntry::Terminal);
            } else if value < length {
                entries.push(FatEntry::Next(value));
            } else {
                return Err(Error::MalformedStore(format!(
                    "FAT slot {i} references block {value} of {length}"
                )));
            }
        }
        let bitmap = Bitmap::from_bytes(&bytes[4 * length as usize..], length)?;
        Ok(Self { entries, bitmap })
    }
}

#[cfg(test)]
mod tests {
    use super::{Fat, FatEntry};

    #[test]
    fn fresh_table_is_all_terminals() {
        let fat = Fat::new(10);
        assert_eq![fat.entry(0), FatEntry::Terminal];
        assert_eq![fat.entry(9), FatEntry::Terminal];
        assert![!fat.bitmap().get(0)];
    }

    #[test]
    fn add_file_claims_distinct_heads() {
        let mut fat = Fat::new(10);
        let first = fat.add_file().unwrap();
        let second = fat.add_file().unwrap();
        assert_eq![first, 0];
        assert_eq![second, 1];
        assert_eq![fat.entry(first), FatEntry::Terminal];
        assert_eq![fat.entry(second), FatEntry::Terminal];
    }

    #[test]
    fn add_block_links_at_the_tail() {
        let mut fat = Fat::new(10);
        let file0 = fat.add_file().unwrap();
        let file1 = fat.add_file().unwrap();

        // file0: 0 -> 2 -> end, file1: 1 -> end
        fat.add_block(file0).unwrap();
        assert_eq![fat.entry(file0), FatEntry::Next(2)];
        assert_eq![fat.entry(2), FatEntry::Terminal];

        // file1: 1 -> 3 -> 4 -> end
        fat.add_block(file1).unwrap();
        fat.add_block(file1).unwrap();
        assert_eq![fat.entry(file1), FatEntry::Next(3)];
        assert_eq![fat.entry(3), FatEntry::Next(4)];
        assert_eq![fat.entry(4), FatEntry::Terminal];
        assert_eq![fat.chain_blocks(file1).unwrap(), vec![1, 3, 4]];
    }

    #[test]
    fn removal_frees_blocks_for_regrowth() {
        let mut fat = Fat::new(7);
        let file0 = fat.add_file().unwrap();
        let file1 = fat.add_file().unwrap();

        fat.add_block(file0).unwrap();
        fat.add_block(file1).unwrap();
        fat.add_block(file1).unwrap();
        fat.add_block(file1).unwrap();
        // file0: 0 -> 2 -> end, file1: 1 -> 3 -> 4 -> 5 -> 6 -> end
        fat.add_block(file1).unwrap();

        fat.remove_file(file0).unwrap();

        // Regrowing file1 reuses exactly the freed blocks.
        fat.add_block(file1).unwrap();
        fat.add_block(file1).unwrap();
        assert_eq![fat.chain_blocks(file1).unwrap(), vec![1, 3, 4, 5, 6, 0, 2]];
        assert_eq![fat.entry(2), FatEntry::Terminal];
    }

    #[test]
    fn serialize_roundtrip() {
        let mut fat = Fat::new(7);
        let file0 = fat.add_file().unwrap();
        let file1 = fat.add_file().unwrap();
        fat.add_block(file0).unwrap();
        for _ in 0..4 {
            fat.add_block(file1).unwrap();
        }
        fat.remove_file(file0).unwrap();
        fat.add_block(file1).unwrap();
        fat.add_block(file1).unwrap();

        let mut buf = vec![0u8; Fat::size(7)];
        let written = fat.serialize(&mut buf).unwrap();
        assert_eq![written, buf.len()];

        let loaded = Fat::load(&buf, 7).unwrap();
        for i in 0..7 {
            assert_eq![loaded.entry(i), fat.entry(i)];
            assert_eq![loaded.bitmap().get(i), fat.bitmap().get(i)];
        }
        assert_eq![loaded.bitmap().as_bytes(), fat.bitmap().as_bytes()];
    }

    #[test]
    fn rejects_out_of_range_reference() {
        let fat = Fat::new(4);
        let mut buf = vec![0u8; Fat::size(4)];
        fat.serialize(&mut buf).unwrap();
        buf[0..4].copy_from_slice(&9u32.to_le_bytes());
        assert![Fat::load(&buf, 4).is_err()];
    }
}
