//! Reachable-domain artifact
//!
//! The artifact is a hosts-format file: a comment header with the update time
//! and total count, a blank line, then one `0.0.0.0 <domain>` line per
//! reachable domain in sorted order. Its domain set only ever grows.

use crate::domain::{extract_domains, DomainSet};
use crate::output::traits::{OutputError, OutputResult};
use crate::storage::write_atomic;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Address every listed domain is mapped to
const NULL_ROUTE: &str = "0.0.0.0";

/// In-memory view of the reachable artifact
#[derive(Debug, Clone)]
pub struct ReachableList {
    path: PathBuf,
    domains: DomainSet,
}

impl ReachableList {
    /// Loads the artifact at `path`
    ///
    /// A missing file is an empty list; it is only created once the first
    /// reachable domain is added.
    pub fn load(path: &Path) -> OutputResult<Self> {
        let domains = match std::fs::read_to_string(path) {
            Ok(text) => extract_domains(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => DomainSet::new(),
            Err(source) => {
                return Err(OutputError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        tracing::debug!(
            "Loaded {} reachable domains from {}",
            domains.len(),
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            domains,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn domains(&self) -> &DomainSet {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    /// Adds domains and rewrites the artifact if any of them are new
    ///
    /// The file is rebuilt in full from the union of the existing and new
    /// domains and replaced atomically. When nothing new is added the file is
    /// not touched.
    ///
    /// # Returns
    ///
    /// The number of domains that were not listed before.
    pub fn extend_and_write<'a, I>(&mut self, domains: I, at: DateTime<Utc>) -> OutputResult<usize>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut merged = self.domains.clone();
        let before = merged.len();
        merged.extend(domains.into_iter().cloned());
        let added = merged.len() - before;

        if added == 0 {
            return Ok(0);
        }

        let rendered = render_reachable_list(&merged, at);
        write_atomic(&self.path, rendered.as_bytes()).map_err(|source| OutputError::Write {
            path: self.path.display().to_string(),
            source,
        })?;

        tracing::info!(
            "Wrote {} reachable domains ({} new) to {}",
            merged.len(),
            added,
            self.path.display()
        );

        // Only adopt the new set once it is durably on disk
        self.domains = merged;
        Ok(added)
    }
}

/// Renders the full artifact text for a set of domains
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use reachscan::domain::DomainSet;
/// use reachscan::output::render_reachable_list;
///
/// let domains: DomainSet = ["b.example", "a.example"].iter().map(|d| d.to_string()).collect();
/// let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
/// let text = render_reachable_list(&domains, at);
///
/// assert!(text.contains("# Last updated: 2024-01-02 03:04:05 UTC\n"));
/// assert!(text.contains("# Total domains: 2\n"));
/// assert!(text.ends_with("\n0.0.0.0 a.example\n0.0.0.0 b.example\n"));
/// ```
pub fn render_reachable_list(domains: &DomainSet, at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("# Reachable domains\n");
    out.push_str("#\n");
    out.push_str("# Domains from the source blocklist that resolved via DNS at least once.\n");
    out.push_str("# Entries are only ever added; a confirmed domain stays listed.\n");
    out.push_str("#\n");
    out.push_str(&format!(
        "# Last updated: {}\n",
        at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("# Total domains: {}\n", domains.len()));
    out.push('\n');

    for domain in domains {
        out.push_str(NULL_ROUTE);
        out.push(' ');
        out.push_str(domain);
        out.push('\n');
    }

    out
}

/// Counts the domain entry lines in artifact text
///
/// Used to verify that the persisted reachable counter matches the artifact.
pub fn count_domain_lines(text: &str) -> usize {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn set(domains: &[&str]) -> DomainSet {
        domains.iter().map(|d| d.to_string()).collect()
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_render_layout() {
        let text = render_reachable_list(&set(&["b.example", "a.example"]), at());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# Reachable domains");
        assert!(lines.contains(&"# Last updated: 2024-06-01 10:00:00 UTC"));
        assert!(lines.contains(&"# Total domains: 2"));
        assert_eq!(&lines[lines.len() - 3..], ["", "0.0.0.0 a.example", "0.0.0.0 b.example"]);
    }

    #[test]
    fn test_render_empty() {
        let text = render_reachable_list(&DomainSet::new(), at());
        assert!(text.contains("# Total domains: 0\n"));
        assert_eq!(count_domain_lines(&text), 0);
    }

    #[test]
    fn test_count_domain_lines() {
        let text = render_reachable_list(&set(&["a.example", "b.example", "c.example"]), at());
        assert_eq!(count_domain_lines(&text), 3);
    }

    #[test]
    fn test_load_missing_artifact_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let list = ReachableList::load(&dir.path().join("reachable.txt")).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_parses_rendered_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reachable.txt");
        std::fs::write(&path, render_reachable_list(&set(&["x.example", "y.example"]), at()))
            .unwrap();

        let list = ReachableList::load(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("x.example"));
        assert!(list.contains("y.example"));
    }

    #[test]
    fn test_extend_writes_union() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reachable.txt");
        let mut list = ReachableList::load(&path).unwrap();

        let added = list
            .extend_and_write(&set(&["b.example", "a.example"]), at())
            .unwrap();
        assert_eq!(added, 2);

        let added = list
            .extend_and_write(&set(&["a.example", "c.example"]), at())
            .unwrap();
        assert_eq!(added, 1);

        let reloaded = ReachableList::load(&path).unwrap();
        assert_eq!(reloaded.domains(), &set(&["a.example", "b.example", "c.example"]));
    }

    #[test]
    fn test_extend_without_new_domains_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reachable.txt");
        let mut list = ReachableList::load(&path).unwrap();
        list.extend_and_write(&set(&["a.example"]), at()).unwrap();
        let before = std::fs::read(&path).unwrap();

        let later = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let added = list.extend_and_write(&set(&["a.example"]), later).unwrap();

        assert_eq!(added, 0);
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_extend_with_nothing_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reachable.txt");
        let mut list = ReachableList::load(&path).unwrap();

        let added = list.extend_and_write(&DomainSet::new(), at()).unwrap();
        assert_eq!(added, 0);
        assert!(!path.exists());
    }
}
