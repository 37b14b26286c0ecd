//! File-level I/O primitives used by [`crate::LocalFilesystem`].

use std::fs::{self, OpenOptions};
use std::path::Path;

use filetime::FileTime;

use crate::{Error, Result};

/// Copy `from` over `to`, then carry the source's access and modification
/// times across.
///
/// Content and permission bits come from the platform copy primitive. An
/// existing destination file is overwritten. Returns the number of bytes
/// copied.
pub fn copy_with_times(from: &Path, to: &Path) -> Result<u64> {
    let bytes = fs::copy(from, to).map_err(|e| Error::io(from, e))?;

    let metadata = fs::metadata(from).map_err(|e| Error::io(from, e))?;
    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(to, atime, mtime).map_err(|e| Error::io(to, e))?;

    Ok(bytes)
}

/// Create an empty file at `path` if it does not exist yet.
///
/// Never truncates an existing file. The parent directory must exist.
pub fn touch(path: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|e| Error::io(path, e))
}
