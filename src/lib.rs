pub mod error;
pub mod filesystem;
pub mod structs;
pub mod tree;
pub mod utils;

pub use error::Error;
pub use filesystem::Filesystem;
