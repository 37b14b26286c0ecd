//! Bounded periodic driver for mirror passes.

use std::time::Duration;

use replica_fs::Filesystem;

use crate::{Durability, Logger, Mirror, RunReport, SyncConfig};

/// Suspends the scheduler between cycles.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// Runs exactly `cycles` mirror passes, sleeping `interval` between
/// consecutive passes and not after the last one.
///
/// There is no early exit: per-entry failures are logged by the mirror and
/// the next cycle runs regardless.
pub struct Scheduler<'a> {
    fs: &'a dyn Filesystem,
    logger: &'a Logger,
    sleeper: Box<dyn Sleeper + 'a>,
}

impl<'a> Scheduler<'a> {
    pub fn new(fs: &'a dyn Filesystem, logger: &'a Logger) -> Self {
        Self {
            fs,
            logger,
            sleeper: Box::new(ThreadSleeper),
        }
    }

    /// Replace the inter-cycle sleep.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'a) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    /// Drive the whole run. Expects a config that has passed validation.
    pub fn run(&self, config: &SyncConfig) -> RunReport {
        let total = config.cycles();
        self.logger.log(
            format!(
                "Starting synchronization. Source: {}, Replica: {}, Interval: {} seconds, Count: {}",
                config.source().display(),
                config.replica().display(),
                config.interval_secs(),
                total
            ),
            Durability::Durable,
        );

        let mirror = Mirror::new(self.fs, self.logger);
        let mut report = RunReport::default();

        for cycle in 1..=total {
            self.logger.log(
                format!("Synchronization cycle {cycle} of {total}"),
                Durability::Durable,
            );

            let pass = mirror.reconcile(config.source(), config.replica());
            self.logger.log(
                format!(
                    "Cycle {cycle} finished: {} actions, {} failures",
                    pass.actions.len(),
                    pass.failures.len()
                ),
                Durability::Durable,
            );
            report.passes.push(pass);

            if cycle < total {
                tracing::debug!(cycle, interval = ?config.interval(), "Sleeping until next cycle");
                self.sleeper.sleep(config.interval());
            }
        }

        self.logger.log(
            format!("Synchronization finished after {total} cycles"),
            Durability::Durable,
        );
        report
    }
}
