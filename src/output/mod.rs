//! Output module for the reachable artifact and run reporting
//!
//! This module handles:
//! - Reading and rewriting the reachable-domain artifact
//! - Summarising a run for the caller and the downstream publish step
//! - Reporting persisted state statistics

mod reachable_list;
pub mod stats;
mod summary;
mod traits;

pub use reachable_list::{count_domain_lines, render_reachable_list, ReachableList};
pub use stats::{load_statistics, print_statistics, StateStatistics};
pub use summary::{print_summary, write_change_signal, RunSummary};
pub use traits::{OutputError, OutputResult};
