use crate::domain::DomainSet;
use crate::state::ScanMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate counters persisted with the scan state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Cumulative number of probe attempts across all runs
    pub total_checked: u64,

    /// Number of domains currently listed in the reachable artifact
    pub reachable: u64,
}

/// Durable record of scan progress, shared by every run
///
/// Presence of a domain in `checked_domains` means it has been probed at
/// least once; the timestamp is informational only. Entries are never purged,
/// even when a domain later disappears from the source list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanState {
    /// When the last full scan completed
    pub last_full_scan: Option<DateTime<Utc>>,

    /// When the last incremental scan completed
    pub last_incremental_scan: Option<DateTime<Utc>>,

    /// Domain -> time of its most recent check
    pub checked_domains: BTreeMap<String, DateTime<Utc>>,

    /// Aggregate counters
    pub scan_stats: ScanStats,
}

impl ScanState {
    /// Creates an empty state, as used on the very first run
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the domain has been probed in any previous run
    pub fn is_checked(&self, domain: &str) -> bool {
        self.checked_domains.contains_key(domain)
    }

    /// Returns the completion time of the last scan in the given mode
    pub fn last_scan(&self, mode: ScanMode) -> Option<DateTime<Utc>> {
        match mode {
            ScanMode::Full => self.last_full_scan,
            ScanMode::Incremental => self.last_incremental_scan,
        }
    }

    /// Records that a scan in the given mode completed at `at`
    pub fn mark_completed(&mut self, mode: ScanMode, at: DateTime<Utc>) {
        match mode {
            ScanMode::Full => self.last_full_scan = Some(at),
            ScanMode::Incremental => self.last_incremental_scan = Some(at),
        }
    }

    /// Merges newly checked domains into the state
    ///
    /// Keys not present in `checked` are left untouched; keys that are present
    /// get their timestamp refreshed to `at`.
    pub fn merge_checked<'a, I>(&mut self, checked: I, at: DateTime<Utc>)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for domain in checked {
            self.checked_domains.insert(domain.clone(), at);
        }
    }

    /// Counts how many of the given domains have never been checked
    pub fn count_unchecked(&self, domains: &DomainSet) -> usize {
        domains.iter().filter(|d| !self.is_checked(d)).count()
    }
}
