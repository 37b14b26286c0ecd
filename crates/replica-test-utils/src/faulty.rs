//! [`FaultyFilesystem`]: a real filesystem with scripted failures.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use replica_fs::{Error, Filesystem, FsEntry, LocalFilesystem, Result, WalkOrder};

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    RemoveFile,
    RemoveDir,
    CreateDir,
    Copy,
}

/// Delegates to [`LocalFilesystem`] except for registered (operation, path)
/// pairs, which fail with `PermissionDenied` as a locked or in-use entry
/// would.
///
/// For [`Fault::Copy`] the registered path is the copy destination.
#[derive(Debug, Default)]
pub struct FaultyFilesystem {
    inner: LocalFilesystem,
    faults: HashSet<(Fault, PathBuf)>,
}

impl FaultyFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `fault` fail whenever it targets `path`.
    pub fn fail(mut self, fault: Fault, path: impl Into<PathBuf>) -> Self {
        self.faults.insert((fault, path.into()));
        self
    }

    fn check(&self, fault: Fault, path: &Path) -> Result<()> {
        if self.faults.contains(&(fault, path.to_path_buf())) {
            return Err(Error::io(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "entry is locked"),
            ));
        }
        Ok(())
    }
}

impl Filesystem for FaultyFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn walk(
        &self,
        root: &Path,
        order: WalkOrder,
    ) -> Box<dyn Iterator<Item = Result<FsEntry>> + '_> {
        self.inner.walk(root, order)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.check(Fault::CreateDir, path)?;
        self.inner.create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.check(Fault::RemoveFile, path)?;
        self.inner.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        self.check(Fault::RemoveDir, path)?;
        self.inner.remove_dir(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<u64> {
        self.check(Fault::Copy, to)?;
        self.inner.copy_file(from, to)
    }

    fn create_empty_file(&self, path: &Path) -> Result<()> {
        self.inner.create_empty_file(path)
    }
}
