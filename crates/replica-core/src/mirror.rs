//! One wipe-then-copy reconciliation pass.

use std::path::{Path, PathBuf};

use replica_fs::{Filesystem, FsEntry, WalkOrder};

use crate::report::{Action, Failure, Operation, PassReport};
use crate::{Durability, Logger};

/// Brings a replica tree into exact correspondence with a source tree.
///
/// A pass runs in two phases:
///
/// - **wipe**: every entry under the replica root is removed bottom-up, so a
///   directory is only removed once it is empty. The root itself stays.
/// - **copy**: the source is walked top-down. Each directory gets a matching
///   replica directory (created if missing) before any of its files are
///   copied in, and each file is copied with its timestamps.
///
/// No single failure stops a pass. Each operation yields an [`Action`] or a
/// [`Failure`]; both are logged as they happen and collected in the returned
/// [`PassReport`].
pub struct Mirror<'a> {
    fs: &'a dyn Filesystem,
    logger: &'a Logger,
}

impl<'a> Mirror<'a> {
    pub fn new(fs: &'a dyn Filesystem, logger: &'a Logger) -> Self {
        Self { fs, logger }
    }

    /// Run one full pass. The source is only ever read.
    pub fn reconcile(&self, source: &Path, replica: &Path) -> PassReport {
        let mut report = PassReport::default();
        self.wipe(replica, &mut report);
        self.copy(source, replica, &mut report);
        tracing::debug!(
            actions = report.actions.len(),
            failures = report.failures.len(),
            "Pass complete"
        );
        report
    }

    fn wipe(&self, replica: &Path, report: &mut PassReport) {
        if !self.fs.exists(replica) {
            tracing::debug!(replica = %replica.display(), "Replica missing, nothing to wipe");
            return;
        }

        for entry in self.fs.walk(replica, WalkOrder::BottomUp) {
            let outcome = match entry {
                Ok(entry) => self.remove(entry),
                Err(e) => Err(Failure::walk(&e)),
            };
            self.record(outcome, report);
        }
    }

    fn remove(&self, entry: FsEntry) -> Result<Action, Failure> {
        if entry.is_dir() {
            match self.fs.remove_dir(entry.path()) {
                Ok(()) => Ok(Action::DeletedDirectory {
                    path: entry.into_path(),
                }),
                Err(e) => Err(Failure::new(Operation::DeleteDirectory, entry.into_path(), &e)),
            }
        } else {
            match self.fs.remove_file(entry.path()) {
                Ok(()) => Ok(Action::DeletedFile {
                    path: entry.into_path(),
                }),
                Err(e) => Err(Failure::new(Operation::DeleteFile, entry.into_path(), &e)),
            }
        }
    }

    fn copy(&self, source: &Path, replica: &Path, report: &mut PassReport) {
        for entry in self.fs.walk(source, WalkOrder::TopDown) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.record(Err(Failure::walk(&e)), report);
                    continue;
                }
            };

            let target = replica_path(source, replica, &entry);
            if entry.is_dir() {
                if self.fs.exists(&target) {
                    continue;
                }
                let outcome = match self.fs.create_dir_all(&target) {
                    Ok(()) => Ok(Action::CreatedDirectory { path: target }),
                    Err(e) => Err(Failure::new(Operation::CreateDirectory, target, &e)),
                };
                self.record(outcome, report);
            } else {
                let outcome = match self.fs.copy_file(entry.path(), &target) {
                    Ok(bytes) => Ok(Action::CopiedFile {
                        from: entry.into_path(),
                        to: target,
                        bytes,
                    }),
                    Err(e) => Err(Failure::copy(entry.into_path(), target, &e)),
                };
                self.record(outcome, report);
            }
        }
    }

    fn record(&self, outcome: Result<Action, Failure>, report: &mut PassReport) {
        match &outcome {
            Ok(action) => self.logger.log(action.to_string(), Durability::Durable),
            Err(failure) => self.logger.warn(failure.to_string(), Durability::Durable),
        }
        report.record(outcome);
    }
}

/// Map an entry under `source` to the same relative path under `replica`.
///
/// The source root maps to the replica root. A source that is itself a file
/// lands inside the replica under its own name.
fn replica_path(source: &Path, replica: &Path, entry: &FsEntry) -> PathBuf {
    match entry.path().strip_prefix(source) {
        Ok(relative) if !relative.as_os_str().is_empty() => replica.join(relative),
        _ if !entry.is_dir() => match entry.path().file_name() {
            Some(name) => replica.join(name),
            None => replica.to_path_buf(),
        },
        _ => replica.to_path_buf(),
    }
}
