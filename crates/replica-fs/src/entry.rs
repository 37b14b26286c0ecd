//! Entries visited while walking a tree.

use std::path::{Path, PathBuf};

/// Whether an entry is a directory or anything else.
///
/// Symlinks and special files count as [`EntryKind::File`]; links are never
/// followed during a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// A path visited during a walk, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    path: PathBuf,
    kind: EntryKind,
}

impl FsEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::File)
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::Directory)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Traversal order for [`crate::Filesystem::walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    /// Parents before children. The root itself is yielded first.
    TopDown,
    /// Children before parents, deepest first. The root is not yielded.
    BottomUp,
}
