//! Statistics from persisted scan state
//!
//! This module provides functionality for summarising the state file and
//! the artifact without running a scan.

use crate::output::reachable_list::count_domain_lines;
use crate::output::traits::OutputError;
use crate::state::ScanState;
use crate::storage::StateStore;
use crate::ScanError;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::Path;

/// Scan statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStatistics {
    /// When the last full scan completed
    pub last_full_scan: Option<DateTime<Utc>>,

    /// When the last incremental scan completed
    pub last_incremental_scan: Option<DateTime<Utc>>,

    /// Distinct domains ever checked
    pub checked_domains: usize,

    /// Cumulative probe attempts
    pub total_checked: u64,

    /// Reachable counter as persisted
    pub reachable: u64,

    /// Domain lines currently in the artifact
    pub artifact_lines: usize,
}

impl StateStatistics {
    /// Builds statistics from a loaded state and the artifact's line count
    pub fn from_state(state: &ScanState, artifact_lines: usize) -> Self {
        Self {
            last_full_scan: state.last_full_scan,
            last_incremental_scan: state.last_incremental_scan,
            checked_domains: state.checked_domains.len(),
            total_checked: state.scan_stats.total_checked,
            reachable: state.scan_stats.reachable,
            artifact_lines,
        }
    }

    /// Returns true if the persisted counter agrees with the artifact
    pub fn is_consistent(&self) -> bool {
        self.reachable == self.artifact_lines as u64
    }
}

/// Loads statistics from the state store and the artifact
///
/// # Arguments
///
/// * `store` - The state backend to query
/// * `artifact` - Path of the reachable artifact (may not exist yet)
pub fn load_statistics(
    store: &dyn StateStore,
    artifact: &Path,
) -> Result<StateStatistics, ScanError> {
    let state = store.load()?;

    let artifact_lines = match std::fs::read_to_string(artifact) {
        Ok(text) => count_domain_lines(&text),
        Err(e) if e.kind() == ErrorKind::NotFound => 0,
        Err(source) => {
            return Err(OutputError::Read {
                path: artifact.display().to_string(),
                source,
            }
            .into())
        }
    };

    Ok(StateStatistics::from_state(&state, artifact_lines))
}

fn format_time(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string())
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StateStatistics) {
    println!("=== Scan State Statistics ===\n");

    println!("Last Scans:");
    println!("  Full: {}", format_time(stats.last_full_scan));
    println!("  Incremental: {}", format_time(stats.last_incremental_scan));
    println!();

    println!("Counters:");
    println!("  Domains checked: {}", stats.checked_domains);
    println!("  Total probe attempts: {}", stats.total_checked);
    println!("  Reachable (recorded): {}", stats.reachable);
    println!("  Reachable (artifact lines): {}", stats.artifact_lines);
    println!();

    if stats.is_consistent() {
        println!("✓ Reachable counter matches the artifact");
    } else {
        println!(
            "✗ Reachable counter ({}) does not match the artifact ({}); the next run will correct it",
            stats.reachable, stats.artifact_lines
        );
    }
}
