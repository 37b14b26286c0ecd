//! Error types for replica-fs

use std::path::PathBuf;

/// Result type for replica-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in replica-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path the failing operation was acting on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Walk { path, .. } => path,
        }
    }

    /// The underlying cause without the path prefix.
    ///
    /// Log lines already name the path, so they interpolate this instead of
    /// the full `Display` output.
    pub fn cause(&self) -> String {
        match self {
            Self::Io { source, .. } => source.to_string(),
            Self::Walk { message, .. } => message.clone(),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        let message = match err.io_error() {
            Some(io) => io.to_string(),
            None => err.to_string(),
        };
        Self::Walk { path, message }
    }
}
