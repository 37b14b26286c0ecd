//! Replica Sync CLI
//!
//! Thin wrapper around `replica-core`: parses the positional arguments and
//! hands a [`replica_core::SyncConfig`] to the engine.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to set up diagnostics: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    commands::run_sync(&cli.config(), cli.json)?;
    Ok(())
}
