//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use replica_core::SyncConfig;

/// Replica Sync - Periodically mirror a source directory onto a replica
///
/// Runs COUNT synchronization cycles, INTERVAL seconds apart. Each cycle
/// empties REPLICA and copies SOURCE into it. Every operation is logged to
/// standard output and appended to LOG_FILE.
#[derive(Parser, Debug)]
#[command(name = "replica-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to mirror from (never modified)
    pub source: PathBuf,

    /// Directory to mirror into (created if missing)
    pub replica: PathBuf,

    /// Seconds to wait between cycles
    pub interval: u64,

    /// Number of synchronization cycles to run
    pub count: u64,

    /// File the activity log is appended to (created if missing)
    pub log_file: PathBuf,

    /// Enable verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the run report as JSON when finished
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The run parameters carried by the positional arguments.
    pub fn config(&self) -> SyncConfig {
        SyncConfig::new(
            &self.source,
            &self.replica,
            self.interval,
            self.count,
            &self.log_file,
        )
    }
}
