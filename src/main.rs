//! CLI entry point for the greedy photo mosaic composer

use clap::Parser;
use greedymosaic::io::cli::{Cli, MosaicRunner};

fn main() -> greedymosaic::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    MosaicRunner::new(cli).run().map(|_| ())
}
