//! The filesystem seam the mirror engine is written against.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::{EntryKind, Error, FsEntry, Result, WalkOrder, io};

/// Filesystem operations needed to validate and mirror a tree.
///
/// Every operation reports failure as a [`crate::Error`] carrying the path
/// it acted on. Implementations must not panic on I/O failure.
pub trait Filesystem {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Walk the tree under `root` in the given order.
    ///
    /// Errors for individual entries are yielded inline; the iteration
    /// continues past them.
    fn walk(
        &self,
        root: &Path,
        order: WalkOrder,
    ) -> Box<dyn Iterator<Item = Result<FsEntry>> + '_>;

    /// Create a directory and any missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> Result<()>;

    /// Copy a file's content and timestamps, overwriting `to`.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<u64>;

    /// Create an empty file unless one already exists.
    fn create_empty_file(&self, path: &Path) -> Result<()>;
}

/// [`Filesystem`] backed by the host OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn walk(
        &self,
        root: &Path,
        order: WalkOrder,
    ) -> Box<dyn Iterator<Item = Result<FsEntry>> + '_> {
        tracing::trace!(root = %root.display(), ?order, "walk");

        let walker = match order {
            WalkOrder::TopDown => WalkDir::new(root),
            WalkOrder::BottomUp => WalkDir::new(root).contents_first(true).min_depth(1),
        }
        .follow_links(false)
        .sort_by_file_name();

        Box::new(walker.into_iter().map(|entry| -> Result<FsEntry> {
            let entry = entry?;
            let kind = if entry.file_type().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            Ok(FsEntry::new(entry.into_path(), kind))
        }))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        tracing::trace!(path = %path.display(), "create_dir_all");
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        tracing::trace!(path = %path.display(), "remove_file");
        fs::remove_file(path).map_err(|e| Error::io(path, e))
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        tracing::trace!(path = %path.display(), "remove_dir");
        fs::remove_dir(path).map_err(|e| Error::io(path, e))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<u64> {
        tracing::trace!(from = %from.display(), to = %to.display(), "copy_file");
        io::copy_with_times(from, to)
    }

    fn create_empty_file(&self, path: &Path) -> Result<()> {
        tracing::trace!(path = %path.display(), "create_empty_file");
        io::touch(path)
    }
}
