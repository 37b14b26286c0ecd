//! Run parameters

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Parameters for one synchronization run.
///
/// Built once from the caller's arguments and never mutated. Values are
/// checked by [`crate::Validator`], not here, so an invalid config can still
/// be constructed and reported on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    source: PathBuf,
    replica: PathBuf,
    interval_secs: u64,
    cycles: u64,
    log_file: PathBuf,
}

impl SyncConfig {
    pub fn new(
        source: impl Into<PathBuf>,
        replica: impl Into<PathBuf>,
        interval_secs: u64,
        cycles: u64,
        log_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            replica: replica.into(),
            interval_secs,
            cycles,
            log_file: log_file.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn replica(&self) -> &Path {
        &self.replica
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    /// Delay between the end of one cycle and the start of the next.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}
