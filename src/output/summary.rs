//! Run summaries and the change signal
//!
//! The summary is what a caller sees after a run; the change signal is the
//! one-line handshake that tells a downstream publish step whether the
//! artifact was rewritten.

use crate::output::traits::{OutputError, OutputResult};
use crate::state::ScanMode;
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Outcome of a single scan run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Mode the run was started in
    pub mode: ScanMode,

    /// Time the run started; also the timestamp recorded for every check
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Domains in the source list
    pub total_domains: usize,

    /// Domains on the work list
    pub planned: usize,

    /// Domains actually probed
    pub checked: usize,

    /// Probed domains that resolved, including ones already listed
    pub reachable: usize,

    /// Resolved domains that were not in the artifact before this run
    pub newly_reachable: usize,

    /// Domains in the artifact after the run
    pub total_reachable: usize,

    /// Whether the artifact file was rewritten
    pub artifact_changed: bool,

    /// Whether the run stopped before finishing its work list
    pub interrupted: bool,
}

impl RunSummary {
    /// Creates a summary for a run that has not probed anything yet
    pub fn new(mode: ScanMode, started_at: DateTime<Utc>) -> Self {
        Self {
            mode,
            started_at,
            duration: Duration::ZERO,
            total_domains: 0,
            planned: 0,
            checked: 0,
            reachable: 0,
            newly_reachable: 0,
            total_reachable: 0,
            artifact_changed: false,
            interrupted: false,
        }
    }

    /// Work list entries that were not probed (non-zero only when interrupted)
    pub fn remaining(&self) -> usize {
        self.planned.saturating_sub(self.checked)
    }
}

/// Prints a run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Scan Summary ({}) ===\n", summary.mode);

    println!("  Started: {}", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Duration: {:.1}s", summary.duration.as_secs_f64());
    println!("  Domains in source: {}", summary.total_domains);
    println!("  Planned: {}", summary.planned);
    println!("  Checked: {}", summary.checked);
    println!("  Reachable this run: {}", summary.reachable);
    println!("  Newly reachable: {}", summary.newly_reachable);
    println!("  Total reachable: {}", summary.total_reachable);

    if summary.interrupted {
        println!(
            "\n  Interrupted: {} planned domains left for the next run",
            summary.remaining()
        );
    }

    println!();
    println!("artifact_changed={}", summary.artifact_changed);
}

/// Appends `changed=<bool>` to the signal file
///
/// The format matches `key=value` step-output files, so the path can point
/// directly at a CI output file.
pub fn write_change_signal(path: &Path, changed: bool) -> OutputResult<()> {
    let write_err = |source| OutputError::Write {
        path: path.display().to_string(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    writeln!(file, "changed={}", changed).map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_summary_is_zeroed() {
        let summary = RunSummary::new(ScanMode::Full, Utc::now());
        assert_eq!(summary.mode, ScanMode::Full);
        assert_eq!(summary.checked, 0);
        assert!(!summary.artifact_changed);
        assert!(!summary.interrupted);
    }

    #[test]
    fn test_remaining() {
        let mut summary = RunSummary::new(ScanMode::Incremental, Utc::now());
        summary.planned = 10;
        summary.checked = 4;
        assert_eq!(summary.remaining(), 6);

        summary.checked = 10;
        assert_eq!(summary.remaining(), 0);
    }

    #[test]
    fn test_change_signal_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signal");
        std::fs::write(&path, "other=1\n").unwrap();

        write_change_signal(&path, true).unwrap();
        write_change_signal(&path, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "other=1\nchanged=true\nchanged=false\n");
    }
}
