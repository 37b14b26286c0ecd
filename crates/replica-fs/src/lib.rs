//! Filesystem capability for Replica Sync
//!
//! Provides the [`Filesystem`] trait the mirror engine calls through, and the
//! [`LocalFilesystem`] implementation backed by the host OS.

pub mod entry;
pub mod error;
pub mod filesystem;
pub mod io;

pub use entry::{EntryKind, FsEntry, WalkOrder};
pub use error::{Error, Result};
pub use filesystem::{Filesystem, LocalFilesystem};
