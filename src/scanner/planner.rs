//! Scan planner
//!
//! Decides which domains a run probes. Full mode takes everything; incremental
//! mode takes only domains that have never been checked, so a domain that
//! failed once is not retried until the next full scan.

use crate::domain::DomainSet;
use crate::state::{ScanMode, ScanState};

/// Ordered list of domains to probe in one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkList {
    domains: Vec<String>,
}

impl WorkList {
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.domains.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.domains
    }
}

impl IntoIterator for WorkList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.domains.into_iter()
    }
}

impl<'a> IntoIterator for &'a WorkList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.domains.iter()
    }
}

/// Computes the work list for a run
///
/// The result follows the set's lexicographic order, so the same inputs
/// always produce the same list.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use reachscan::{plan, DomainSet, ScanMode, ScanState};
///
/// let all: DomainSet = ["a.example", "b.example"].iter().map(|d| d.to_string()).collect();
/// let mut state = ScanState::new();
/// state.checked_domains.insert("a.example".to_string(), Utc::now());
///
/// let work = plan(&all, &state, ScanMode::Incremental);
/// assert_eq!(work.as_slice(), ["b.example"]);
///
/// let work = plan(&all, &state, ScanMode::Full);
/// assert_eq!(work.len(), 2);
/// ```
pub fn plan(all_domains: &DomainSet, state: &ScanState, mode: ScanMode) -> WorkList {
    let domains = match mode {
        ScanMode::Full => all_domains.iter().cloned().collect(),
        ScanMode::Incremental => all_domains
            .iter()
            .filter(|domain| !state.is_checked(domain))
            .cloned()
            .collect(),
    };

    WorkList { domains }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn set(domains: &[&str]) -> DomainSet {
        domains.iter().map(|d| d.to_string()).collect()
    }

    fn checked(domains: &[&str]) -> ScanState {
        let mut state = ScanState::new();
        for d in domains {
            state.checked_domains.insert(d.to_string(), Utc::now());
        }
        state
    }

    #[test]
    fn test_incremental_first_run_takes_everything() {
        let work = plan(&set(&["b.example", "a.example"]), &ScanState::new(), ScanMode::Incremental);
        assert_eq!(work.as_slice(), ["a.example", "b.example"]);
    }

    #[test]
    fn test_incremental_skips_checked_domains() {
        let all = set(&["a.example", "b.example", "c.example"]);
        let state = checked(&["a.example", "b.example"]);

        let work = plan(&all, &state, ScanMode::Incremental);
        assert_eq!(work.as_slice(), ["c.example"]);
        assert!(!work.contains("a.example"));
    }

    #[test]
    fn test_incremental_all_checked_is_empty() {
        let all = set(&["a.example", "b.example"]);
        let state = checked(&["a.example", "b.example"]);

        let work = plan(&all, &state, ScanMode::Incremental);
        assert!(work.is_empty());
    }

    #[test]
    fn test_full_ignores_state() {
        let all = set(&["a.example", "b.example"]);
        let state = checked(&["a.example", "b.example"]);

        let work = plan(&all, &state, ScanMode::Full);
        assert_eq!(work.as_slice(), ["a.example", "b.example"]);
    }

    #[test]
    fn test_stale_state_entries_do_not_leak_into_plan() {
        let all = set(&["a.example"]);
        let state = checked(&["removed.example"]);

        let work = plan(&all, &state, ScanMode::Full);
        assert_eq!(work.as_slice(), ["a.example"]);
        let work = plan(&all, &state, ScanMode::Incremental);
        assert_eq!(work.as_slice(), ["a.example"]);
    }

    #[test]
    fn test_empty_source_is_empty_plan() {
        for mode in [ScanMode::Full, ScanMode::Incremental] {
            assert!(plan(&DomainSet::new(), &ScanState::new(), mode).is_empty());
        }
    }
}
