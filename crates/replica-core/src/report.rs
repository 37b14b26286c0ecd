//! Outcomes of mirror passes and whole runs

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A filesystem change made during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    DeletedFile { path: PathBuf },
    DeletedDirectory { path: PathBuf },
    CreatedDirectory { path: PathBuf },
    CopiedFile { from: PathBuf, to: PathBuf, bytes: u64 },
}

impl Action {
    /// The replica-side path this action touched.
    pub fn path(&self) -> &Path {
        match self {
            Self::DeletedFile { path }
            | Self::DeletedDirectory { path }
            | Self::CreatedDirectory { path } => path,
            Self::CopiedFile { to, .. } => to,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeletedFile { path } => write!(f, "Deleted file: {}", path.display()),
            Self::DeletedDirectory { path } => write!(f, "Deleted directory: {}", path.display()),
            Self::CreatedDirectory { path } => write!(f, "Created directory: {}", path.display()),
            Self::CopiedFile { from, to, .. } => {
                write!(f, "Copied file: {} -> {}", from.display(), to.display())
            }
        }
    }
}

/// The kind of operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    DeleteFile,
    DeleteDirectory,
    CreateDirectory,
    CopyFile,
    Walk,
}

/// A single failed operation. The pass carries on after recording it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub operation: Operation,
    pub path: PathBuf,
    /// Destination of a failed copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
    pub cause: String,
}

impl Failure {
    pub fn new(operation: Operation, path: impl Into<PathBuf>, err: &replica_fs::Error) -> Self {
        Self {
            operation,
            path: path.into(),
            target: None,
            cause: err.cause(),
        }
    }

    /// A failed copy from `from` to `to`.
    pub fn copy(from: impl Into<PathBuf>, to: impl Into<PathBuf>, err: &replica_fs::Error) -> Self {
        Self {
            target: Some(to.into()),
            ..Self::new(Operation::CopyFile, from, err)
        }
    }

    /// A listing error raised while walking a tree.
    pub fn walk(err: &replica_fs::Error) -> Self {
        Self::new(Operation::Walk, err.path(), err)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match (self.operation, &self.target) {
            (Operation::CopyFile, Some(target)) => write!(
                f,
                "Failed to copy file {} to {}: {}",
                path,
                target.display(),
                self.cause
            ),
            (Operation::CopyFile, None) => write!(f, "Failed to copy file {}: {}", path, self.cause),
            (Operation::DeleteFile, _) => write!(f, "Failed to delete file {}: {}", path, self.cause),
            (Operation::DeleteDirectory, _) => {
                write!(f, "Failed to delete directory {}: {}", path, self.cause)
            }
            (Operation::CreateDirectory, _) => {
                write!(f, "Failed to create directory {}: {}", path, self.cause)
            }
            (Operation::Walk, _) => write!(f, "Failed to list {}: {}", path, self.cause),
        }
    }
}

/// Everything that happened during one wipe-then-copy pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub actions: Vec<Action>,
    pub failures: Vec<Failure>,
}

impl PassReport {
    /// True when every operation in the pass succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record(&mut self, outcome: std::result::Result<Action, Failure>) {
        match outcome {
            Ok(action) => self.actions.push(action),
            Err(failure) => self.failures.push(failure),
        }
    }
}

/// Reports for every cycle of a run, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub passes: Vec<PassReport>,
}

impl RunReport {
    /// Number of mirror passes that ran.
    pub fn cycles(&self) -> usize {
        self.passes.len()
    }

    pub fn total_actions(&self) -> usize {
        self.passes.iter().map(|p| p.actions.len()).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.passes.iter().map(|p| p.failures.len()).sum()
    }
}
