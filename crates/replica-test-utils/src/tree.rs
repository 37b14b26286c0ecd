//! [`TestTree`] builder for mirror scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Relative path to file bytes, or `None` for a directory.
pub type Snapshot = BTreeMap<PathBuf, Option<Vec<u8>>>;

/// A temporary directory holding `source/`, `replica/` and a log file
/// location, with helpers for populating and asserting on them.
///
/// # Example
///
/// ```rust,no_run
/// use replica_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write_source("x.txt", "hello");
/// tree.write_replica("old.txt", "stale");
/// assert!(tree.source().join("x.txt").exists());
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create the temp root with empty `source/` and `replica/` directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("source")).unwrap();
        fs::create_dir(temp_dir.path().join("replica")).unwrap();
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source(&self) -> PathBuf {
        self.root().join("source")
    }

    pub fn replica(&self) -> PathBuf {
        self.root().join("replica")
    }

    /// Log file location. Not created until something writes to it.
    pub fn log_file(&self) -> PathBuf {
        self.root().join("logs").join("sync.log")
    }

    /// Write a file under `source/`, creating parent directories.
    pub fn write_source(&self, relative: &str, content: &str) -> PathBuf {
        write(&self.source(), relative, content)
    }

    /// Write a file under `replica/`, creating parent directories.
    pub fn write_replica(&self, relative: &str, content: &str) -> PathBuf {
        write(&self.replica(), relative, content)
    }

    /// Create an (empty) directory under `source/`.
    pub fn mkdir_source(&self, relative: &str) -> PathBuf {
        let path = self.source().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Contents of the log file, or an empty string if it does not exist.
    pub fn log(&self) -> String {
        fs::read_to_string(self.log_file()).unwrap_or_default()
    }

    /// Assert that source and replica hold the same entries and bytes.
    ///
    /// # Panics
    /// Panics with both snapshots if they differ.
    pub fn assert_mirrored(&self) {
        let source = snapshot(&self.source());
        let replica = snapshot(&self.replica());
        assert!(
            source == replica,
            "Replica does not mirror source.\nSource:  {:?}\nReplica: {:?}",
            source.keys().collect::<Vec<_>>(),
            replica.keys().collect::<Vec<_>>()
        );
    }
}

fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Capture every entry under `root`, keyed by path relative to `root`.
///
/// The root itself is not included. Returns an empty snapshot if `root`
/// does not exist.
pub fn snapshot(root: &Path) -> Snapshot {
    if !root.is_dir() {
        return Snapshot::new();
    }
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let content = if entry.file_type().is_dir() {
                None
            } else {
                Some(fs::read(entry.path()).unwrap())
            };
            (relative, content)
        })
        .collect()
}
