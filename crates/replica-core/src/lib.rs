//! Mirror engine for Replica Sync
//!
//! Periodically makes a replica directory an exact copy of a source
//! directory for a fixed number of cycles. Every pass wipes the replica and
//! copies the source back in; every filesystem operation is logged.
//!
//! - [`Validator`]: pre-flight checks on a [`SyncConfig`]
//! - [`Mirror`]: one wipe-then-copy pass
//! - [`Scheduler`]: the bounded loop of passes
//! - [`Logger`]: timestamped console and log-file output

pub mod config;
pub mod error;
pub mod logger;
pub mod mirror;
pub mod report;
pub mod scheduler;
pub mod validator;

pub use config::SyncConfig;
pub use error::{Error, Result};
pub use logger::{Durability, Logger};
pub use mirror::Mirror;
pub use report::{Action, Failure, Operation, PassReport, RunReport};
pub use scheduler::{Scheduler, Sleeper, ThreadSleeper};
pub use validator::{Preflight, Validator};

use replica_fs::{Filesystem, LocalFilesystem};

/// Validate `config` and, if it passes, run every cycle against the local
/// filesystem.
///
/// Returns the validation error without mirroring anything if a pre-flight
/// check fails. Never exits the process.
pub fn run(config: &SyncConfig) -> Result<RunReport> {
    run_with(&LocalFilesystem, config)
}

/// [`run`] against an arbitrary [`Filesystem`].
pub fn run_with(fs: &dyn Filesystem, config: &SyncConfig) -> Result<RunReport> {
    let console = Logger::console();
    Validator::new(fs, &console).preflight(config)?;

    let logger = Logger::to_file(config.log_file());
    Ok(Scheduler::new(fs, &logger).run(config))
}
