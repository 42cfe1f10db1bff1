use std::path::PathBuf;

use clap::Parser;

use fatsim::structs::DEFAULT_BLOCK_SIZE;
use fatsim::Filesystem;

mod shell;

/// Simulated FAT-style block filesystem inside a single backing file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Backing store image; created and sized if it does not exist yet
    image: PathBuf,

    /// Number of data blocks for a newly created store
    #[arg(long, default_value_t = 1024)]
    blocks: u32,

    /// Data block size in bytes for a newly created store
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let mut fs = Filesystem::mount(&args.image, args.blocks, args.block_size)?;
    shell::run(&mut fs);
    Ok(())
}
