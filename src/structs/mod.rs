mod bitmap;
mod fat;
mod superblock;

pub use bitmap::Bitmap;
pub use fat::{Fat, FatEntry};
pub use superblock::Superblock;

/// Default data block size in bytes.
pub const DEFAULT_BLOCK_SIZE: u32 = 4096;

/// Byte length of the on-disk superblock header.
pub const SUPERBLOCK_SIZE: usize = 8;
