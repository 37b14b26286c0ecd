//! The synchronization run: validate, mirror every cycle, summarize.

use std::io::{self, Write};

use colored::Colorize;

use replica_core::{RunReport, SyncConfig};

use crate::error::Result;

/// Run every cycle for `config` and print a summary (or the JSON report).
///
/// Per-entry failures have already been logged by the engine and do not
/// make the command fail.
pub fn run_sync(config: &SyncConfig, json: bool) -> Result<RunReport> {
    tracing::debug!(?config, "Starting run");
    let report = replica_core::run(config)?;

    let output = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        summary(&report)
    };
    // The run already finished; a reader that went away does not undo it.
    if let Err(e) = writeln!(io::stdout().lock(), "{output}") {
        tracing::warn!(error = %e, "Failed to print run summary");
    }

    Ok(report)
}

fn summary(report: &RunReport) -> String {
    let status = if report.total_failures() == 0 {
        "OK".green().bold()
    } else {
        "PARTIAL".yellow().bold()
    };
    format!(
        "{} {} cycles, {} actions, {} failures",
        status,
        report.cycles(),
        report.total_actions(),
        report.total_failures()
    )
}
