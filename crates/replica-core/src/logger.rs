//! Activity log: timestamped lines on stdout and, once bound, in a log file.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Timestamp layout used for every log line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where a message is allowed to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    /// Standard output only.
    Console,
    /// Standard output and the bound log file.
    Durable,
}

/// Single sink for every message the engine emits.
///
/// Constructed once and handed by reference to the validator, mirror and
/// scheduler. A console logger is used until the log file is known to be
/// usable; after that, a file-bound logger takes over.
///
/// Logging never fails from the caller's point of view. A failed console
/// echo or file append (a closed pipe on stdout, a read-only log file) is
/// reported as a `tracing` warning and otherwise dropped, so it cannot mask
/// the filesystem error that was being logged or end the run.
#[derive(Debug, Clone)]
pub struct Logger {
    sink: Option<PathBuf>,
}

impl Logger {
    /// A logger with no file destination.
    pub fn console() -> Self {
        Self { sink: None }
    }

    /// A logger appending durable messages to `path`.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            sink: Some(path.into()),
        }
    }

    /// The bound log file, if any.
    pub fn sink(&self) -> Option<&Path> {
        self.sink.as_deref()
    }

    /// Log an informational message.
    pub fn log(&self, message: impl AsRef<str>, durability: Durability) {
        let message = message.as_ref();
        tracing::info!(target: "replica::activity", "{message}");
        self.write(message, durability);
    }

    /// Log a failure. Same destinations as [`Logger::log`].
    pub fn warn(&self, message: impl AsRef<str>, durability: Durability) {
        let message = message.as_ref();
        tracing::warn!(target: "replica::activity", "{message}");
        self.write(message, durability);
    }

    fn write(&self, message: &str, durability: Durability) {
        self.write_to(&mut io::stdout().lock(), message, durability);
    }

    fn write_to(&self, console: &mut dyn Write, message: &str, durability: Durability) {
        let line = format_line(Local::now(), message);
        if let Err(e) = writeln!(console, "{line}") {
            tracing::warn!(error = %e, "Failed to echo to console");
        }

        if durability == Durability::Console {
            return;
        }
        if let Some(path) = &self.sink {
            if let Err(e) = append(path, &line) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to append to log file");
            }
        }
    }
}

/// Render `message` as `[YYYY-MM-DD HH:MM:SS] message`.
pub fn format_line(at: DateTime<Local>, message: &str) -> String {
    format!("[{}] {}", at.format(TIMESTAMP_FORMAT), message)
}

fn append(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}
