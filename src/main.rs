//! CLI entry point for the wave function collapse texture synthesizer

use clap::Parser;
use wavetile::io::cli::{Cli, SampleProcessor};

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    let mut processor = SampleProcessor::new(cli);
    processor.process()
}
