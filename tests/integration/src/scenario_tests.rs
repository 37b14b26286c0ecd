//! Scenario tests
//!
//! End-to-end runs of the whole engine: validation, the bounded scheduler
//! and the mirror, observed through the replica tree and the log file.

use pretty_assertions::assert_eq;
use replica_core::{Logger, Operation, Scheduler, Sleeper, SyncConfig, run_with};
use replica_fs::LocalFilesystem;
use replica_test_utils::{Fault, FaultyFilesystem, TestTree, snapshot};
use std::cell::Cell;
use std::time::Duration;

fn cycle_lines(log: &str) -> usize {
    log.lines()
        .filter(|l| l.contains("] Synchronization cycle "))
        .count()
}

/// Counts sleeps and how many passes had started when each one happened.
struct CountingSleeper<'a> {
    tree: &'a TestTree,
    sleeps: Cell<usize>,
    cycles_seen: Cell<usize>,
}

impl Sleeper for CountingSleeper<'_> {
    fn sleep(&self, _duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.cycles_seen.set(cycle_lines(&self.tree.log()));
    }
}

// =============================================================================
// Scenario: empty source clears the replica
// =============================================================================

#[test]
fn scenario_empty_source_clears_replica() {
    let tree = TestTree::new();
    tree.write_replica("old.txt", "...");
    let config = SyncConfig::new(tree.source(), tree.replica(), 1, 1, tree.log_file());

    let report = run_with(&LocalFilesystem, &config).unwrap();

    assert!(snapshot(&tree.replica()).is_empty());
    assert_eq!(report.total_actions(), 1);
    let deletions: Vec<_> = tree
        .log()
        .lines()
        .filter(|l| l.contains("Deleted file:"))
        .map(str::to_owned)
        .collect();
    assert_eq!(deletions.len(), 1);
    assert!(deletions[0].ends_with("old.txt"));
}

// =============================================================================
// Scenario: a locked replica file does not abort the pass
// =============================================================================

#[test]
fn scenario_error_isolation() {
    let tree = TestTree::new();
    tree.write_source("a.txt", "alpha");
    tree.write_source("b.txt", "beta");
    let locked = tree.write_replica("b.txt", "old beta");
    let faulty = FaultyFilesystem::new().fail(Fault::RemoveFile, &locked);
    let config = SyncConfig::new(tree.source(), tree.replica(), 1, 1, tree.log_file());

    let report = run_with(&faulty, &config).unwrap();

    assert_eq!(report.cycles(), 1);
    let failures = &report.passes[0].failures;
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].operation, Operation::DeleteFile);
    assert_eq!(
        std::fs::read_to_string(tree.replica().join("a.txt")).unwrap(),
        "alpha"
    );
    assert!(tree.log().contains("Failed to delete file"));
    assert!(tree.log().contains("Synchronization finished after 1 cycles"));
}

// =============================================================================
// Property: N passes and N-1 sleeps, even when every pass has failures
// =============================================================================

#[test]
fn property_bounded_execution() {
    let tree = TestTree::new();
    tree.write_source("a.txt", "a");
    let locked = tree.write_replica("stuck.txt", "s");
    let faulty = FaultyFilesystem::new().fail(Fault::RemoveFile, &locked);
    std::fs::create_dir_all(tree.log_file().parent().unwrap()).unwrap();
    let logger = Logger::to_file(tree.log_file());
    let config = SyncConfig::new(tree.source(), tree.replica(), 60, 5, tree.log_file());
    let sleeper = CountingSleeper {
        tree: &tree,
        sleeps: Cell::new(0),
        cycles_seen: Cell::new(0),
    };

    let report = Scheduler::new(&faulty, &logger)
        .with_sleeper(&sleeper)
        .run(&config);

    assert_eq!(report.cycles(), 5);
    assert_eq!(report.total_failures(), 5);
    assert_eq!(sleeper.sleeps.get(), 4);
    // The last sleep happened after cycle 4 started and before cycle 5.
    assert_eq!(sleeper.cycles_seen.get(), 4);
    assert_eq!(cycle_lines(&tree.log()), 5);
}

// =============================================================================
// Property: fatal pre-flight failure runs nothing
// =============================================================================

#[test]
fn property_fatal_short_circuit() {
    let tree = TestTree::new();
    tree.write_replica("precious.txt", "keep");
    let before = snapshot(&tree.replica());
    let config = SyncConfig::new(
        tree.root().join("no-such-source"),
        tree.replica(),
        1,
        3,
        tree.log_file(),
    );

    let result = run_with(&LocalFilesystem, &config);

    assert!(result.is_err());
    assert_eq!(snapshot(&tree.replica()), before);
    assert_eq!(cycle_lines(&tree.log()), 0);
}

// =============================================================================
// Property: idempotence and completeness over a nested tree
// =============================================================================

#[test]
fn property_idempotent_complete_mirror() {
    let tree = TestTree::new();
    tree.write_source("root.txt", "r");
    tree.write_source("a/one.txt", "1");
    tree.write_source("a/b/two.txt", "2");
    tree.mkdir_source("a/empty");
    tree.write_replica("a/orphan.txt", "o");
    tree.write_replica("z/orphan_dir/file.txt", "o");
    let config = SyncConfig::new(tree.source(), tree.replica(), 1, 1, tree.log_file());

    run_with(&LocalFilesystem, &config).unwrap();
    let first = snapshot(&tree.replica());
    run_with(&LocalFilesystem, &config).unwrap();
    let second = snapshot(&tree.replica());

    tree.assert_mirrored();
    assert_eq!(first, second);
    assert_eq!(first, snapshot(&tree.source()));
}
