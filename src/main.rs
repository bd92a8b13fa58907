//! CLI entry point for the tile-budget reduction tool

use clap::Parser;
use tilepress::io::cli::{Cli, FileProcessor};

fn main() -> tilepress::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
