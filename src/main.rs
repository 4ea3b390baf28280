use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod config;
mod core;
mod error;
mod logging;
mod pipeline;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.log_dir.as_deref()).context("Failed to set up logging")?;

    cli.run()
}
