//! Pre-flight checks run before any mirroring starts.

use std::path::{Path, PathBuf};

use replica_fs::Filesystem;

use crate::{Durability, Error, Logger, Result, SyncConfig};

/// Side effects of a successful pre-flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preflight {
    /// The replica root was missing and has been created.
    pub replica_created: bool,
    /// The log file was missing and has been created empty.
    pub log_file_created: bool,
}

/// Gatekeeper between the caller's parameters and the scheduler.
///
/// Checks, in order, stopping at the first failure:
/// 1. the source path exists (any kind of entry),
/// 2. the interval is positive,
/// 3. the cycle count is positive,
/// 4. the replica is neither the source nor an ancestor of it,
/// 5. the replica root exists, creating it if absent,
/// 6. the log file exists, creating its parent and an empty file if absent.
///
/// Check 4 compares resolved paths. A replica nested inside the source is
/// not rejected; its own contents are then mirrored back into it.
///
/// All messages are console-only: the log file is not trusted until this
/// has passed.
pub struct Validator<'a> {
    fs: &'a dyn Filesystem,
    logger: &'a Logger,
}

impl<'a> Validator<'a> {
    pub fn new(fs: &'a dyn Filesystem, logger: &'a Logger) -> Self {
        Self { fs, logger }
    }

    /// Run every check and return the first failure.
    ///
    /// Creating the replica or log file is reported on the console; a failure
    /// is returned but not logged.
    pub fn check(&self, config: &SyncConfig) -> Result<Preflight> {
        let mut preflight = Preflight::default();

        if !self.fs.exists(config.source()) {
            return Err(Error::SourceMissing {
                path: config.source().to_path_buf(),
            });
        }
        if config.interval_secs() == 0 {
            return Err(Error::InvalidInterval);
        }
        if config.cycles() == 0 {
            return Err(Error::InvalidCycleCount);
        }

        let replica = config.replica();
        if resolve(config.source()).starts_with(resolve(replica)) {
            return Err(Error::ReplicaContainsSource {
                replica: replica.to_path_buf(),
                path: config.source().to_path_buf(),
            });
        }

        if !self.fs.exists(replica) {
            self.fs
                .create_dir_all(replica)
                .map_err(|source| Error::ReplicaUncreatable {
                    path: replica.to_path_buf(),
                    source,
                })?;
            preflight.replica_created = true;
            self.logger.log(
                format!("Replica path {} did not exist and was created.", replica.display()),
                Durability::Console,
            );
        }

        let log_file = config.log_file();
        if !self.fs.exists(log_file) {
            self.create_log_file(log_file)
                .map_err(|source| Error::LogFileUncreatable {
                    path: log_file.to_path_buf(),
                    source,
                })?;
            preflight.log_file_created = true;
            self.logger.log(
                format!("Log file {} did not exist and was created.", log_file.display()),
                Durability::Console,
            );
        }

        tracing::debug!(?preflight, "Pre-flight passed");
        Ok(preflight)
    }

    /// Like [`Validator::check`], but logs the failure on the console.
    pub fn preflight(&self, config: &SyncConfig) -> Result<Preflight> {
        self.check(config).inspect_err(|e| {
            self.logger.warn(e.to_string(), Durability::Console);
        })
    }

    /// True only if every check passes.
    pub fn validate(&self, config: &SyncConfig) -> bool {
        self.preflight(config).is_ok()
    }

    fn create_log_file(&self, path: &Path) -> replica_fs::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !self.fs.exists(parent) {
                self.fs.create_dir_all(parent)?;
            }
        }
        self.fs.create_empty_file(path)
    }
}

/// Absolute form of `path` with symlinks resolved where it exists.
fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use replica_fs::LocalFilesystem;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            fs::create_dir(temp.path().join("source")).unwrap();
            Self { temp }
        }

        fn config(&self, interval: u64, cycles: u64) -> SyncConfig {
            let root = self.temp.path();
            SyncConfig::new(
                root.join("source"),
                root.join("replica"),
                interval,
                cycles,
                root.join("logs/sync.log"),
            )
        }
    }

    #[test]
    fn test_valid_config_creates_replica_and_log_file() {
        let fixture = Fixture::new();
        let config = fixture.config(1, 1);
        let logger = Logger::console();

        let preflight = Validator::new(&LocalFilesystem, &logger)
            .check(&config)
            .unwrap();

        assert!(preflight.replica_created);
        assert!(preflight.log_file_created);
        assert!(config.replica().is_dir());
        assert!(config.log_file().is_file());
        assert_eq!(fs::read_to_string(config.log_file()).unwrap(), "");
    }

    #[test]
    fn test_existing_replica_and_log_are_left_alone() {
        let fixture = Fixture::new();
        let config = fixture.config(1, 1);
        fs::create_dir_all(config.replica()).unwrap();
        fs::create_dir_all(config.log_file().parent().unwrap()).unwrap();
        fs::write(config.log_file(), "earlier run\n").unwrap();
        let logger = Logger::console();

        let preflight = Validator::new(&LocalFilesystem, &logger)
            .check(&config)
            .unwrap();

        assert_eq!(preflight, Preflight::default());
        assert_eq!(fs::read_to_string(config.log_file()).unwrap(), "earlier run\n");
    }

    #[test]
    fn test_missing_source_fails_before_touching_replica() {
        let fixture = Fixture::new();
        fs::remove_dir(fixture.temp.path().join("source")).unwrap();
        let config = fixture.config(1, 1);
        let logger = Logger::console();

        let result = Validator::new(&LocalFilesystem, &logger).check(&config);

        assert!(matches!(result, Err(Error::SourceMissing { .. })));
        assert!(!config.replica().exists());
        assert!(!config.log_file().exists());
    }

    #[test]
    fn test_source_may_be_a_file() {
        let fixture = Fixture::new();
        let root = fixture.temp.path();
        fs::write(root.join("single.txt"), "x").unwrap();
        let config = SyncConfig::new(
            root.join("single.txt"),
            root.join("replica"),
            1,
            1,
            root.join("sync.log"),
        );
        let logger = Logger::console();

        assert!(Validator::new(&LocalFilesystem, &logger).validate(&config));
    }

    #[rstest]
    #[case::zero_interval(0, 1)]
    #[case::zero_cycles(1, 0)]
    #[case::both_zero(0, 0)]
    fn test_non_positive_parameters_are_rejected(#[case] interval: u64, #[case] cycles: u64) {
        let fixture = Fixture::new();
        let config = fixture.config(interval, cycles);
        let logger = Logger::console();

        assert!(!Validator::new(&LocalFilesystem, &logger).validate(&config));
        assert!(!config.replica().exists());
    }

    #[rstest]
    #[case::same_directory("source")]
    #[case::parent_directory(".")]
    #[case::dotted_alias("source/../source")]
    fn test_replica_containing_source_is_rejected(#[case] replica: &str) {
        let fixture = Fixture::new();
        let root = fixture.temp.path();
        fs::write(root.join("source/keep.txt"), "keep").unwrap();
        let config = SyncConfig::new(
            root.join("source"),
            root.join(replica),
            1,
            1,
            root.join("sync.log"),
        );
        let logger = Logger::console();

        let result = Validator::new(&LocalFilesystem, &logger).check(&config);

        assert!(matches!(result, Err(Error::ReplicaContainsSource { .. })));
        assert!(root.join("source/keep.txt").exists());
        assert!(!root.join("sync.log").exists());
    }

    #[test]
    fn test_sibling_with_common_prefix_is_not_an_ancestor() {
        let fixture = Fixture::new();
        let root = fixture.temp.path();
        let config = SyncConfig::new(
            root.join("source"),
            root.join("sour"),
            1,
            1,
            root.join("sync.log"),
        );
        let logger = Logger::console();

        assert!(Validator::new(&LocalFilesystem, &logger).validate(&config));
        assert!(root.join("sour").is_dir());
    }

    #[test]
    fn test_uncreatable_replica_is_fatal() {
        let fixture = Fixture::new();
        let root = fixture.temp.path();
        // A regular file where a parent directory is needed.
        fs::write(root.join("blocker"), "x").unwrap();
        let config = SyncConfig::new(
            root.join("source"),
            root.join("blocker/replica"),
            1,
            1,
            root.join("sync.log"),
        );
        let logger = Logger::console();

        let result = Validator::new(&LocalFilesystem, &logger).check(&config);

        let err = result.unwrap_err();
        assert!(matches!(err, Error::ReplicaUncreatable { .. }));
        assert!(err.to_string().starts_with("Failed to create replica path"));
    }

    #[test]
    fn test_uncreatable_log_file_is_fatal() {
        let fixture = Fixture::new();
        let root = fixture.temp.path();
        fs::write(root.join("blocker"), "x").unwrap();
        let config = SyncConfig::new(
            root.join("source"),
            root.join("replica"),
            1,
            1,
            root.join("blocker/sync.log"),
        );
        let logger = Logger::console();

        let result = Validator::new(&LocalFilesystem, &logger).check(&config);

        assert!(matches!(result, Err(Error::LogFileUncreatable { .. })));
    }

    #[test]
    fn test_validation_messages_never_reach_a_bound_log() {
        let fixture = Fixture::new();
        fs::remove_dir(fixture.temp.path().join("source")).unwrap();
        let config = fixture.config(1, 1);
        let log_path = fixture.temp.path().join("bound.log");
        let logger = Logger::to_file(&log_path);

        assert!(!Validator::new(&LocalFilesystem, &logger).validate(&config));
        assert!(!log_path.exists());
    }
}
