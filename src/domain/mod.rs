//! Domain extraction for hosts-format blocklists
//!
//! This module turns the raw text of a source list into a [`DomainSet`]:
//! a deduplicated, lexicographically ordered set of domain names. Parsing is
//! tolerant; comment lines, blank lines and malformed entries are skipped
//! rather than rejected.

mod extract;
mod validate;

use std::collections::BTreeSet;

// Re-export main functions
pub use extract::{extract_domains, load_domain_set};
pub use validate::is_valid_domain;

/// Ordered, deduplicated set of domain names
///
/// The ordering is what makes work lists and the rendered artifact
/// reproducible between runs.
pub type DomainSet = BTreeSet<String>;
