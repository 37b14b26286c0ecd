//! Error types for replica-core

use std::path::PathBuf;

/// Result type for replica-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pre-flight failures that stop a run before any mirroring happens.
///
/// Per-entry failures during a pass are not errors; they are recorded as
/// [`crate::Failure`] values in the pass report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source tree is missing
    #[error("Source path {path} does not exist")]
    SourceMissing { path: PathBuf },

    /// Interval between cycles is zero
    #[error("Interval must be greater than 0")]
    InvalidInterval,

    /// Number of cycles is zero
    #[error("Count must be greater than 0")]
    InvalidCycleCount,

    /// The replica is the source itself or one of its ancestors, so wiping
    /// it would delete the source
    #[error("Replica path {replica} must not contain source path {path}")]
    ReplicaContainsSource { replica: PathBuf, path: PathBuf },

    /// The replica root was absent and could not be created
    #[error("Failed to create replica path {path}: {}", .source.cause())]
    ReplicaUncreatable {
        path: PathBuf,
        #[source]
        source: replica_fs::Error,
    },

    /// The log file was absent and could not be created
    #[error("Failed to create log file {path}: {}", .source.cause())]
    LogFileUncreatable {
        path: PathBuf,
        #[source]
        source: replica_fs::Error,
    },
}
