//! Scanner module: planning and orchestration of scan runs
//!
//! This module contains the core scanning logic, including:
//! - Work list planning for full and incremental modes
//! - The orchestrator that probes, accumulates, and persists results

mod orchestrator;
mod planner;

pub use orchestrator::{Orchestrator, ScanOptions};
pub use planner::{plan, WorkList};

use crate::config::Config;
use crate::domain::load_domain_set;
use crate::output::{ReachableList, RunSummary};
use crate::prober::DnsProber;
use crate::state::ScanMode;
use crate::storage::JsonStateStore;
use crate::ScanError;
use std::future::Future;

/// Runs a complete scan with the configured files and the system resolver
///
/// This is the main entry point for a scan. It will:
/// 1. Extract the domain set from the source list
/// 2. Open the state store and the reachable artifact
/// 3. Build the DNS prober
/// 4. Plan, probe, and persist through the [`Orchestrator`]
///
/// The source list is read before anything else, so a malformed source
/// aborts the run with no state touched.
///
/// # Example
///
/// ```no_run
/// use reachscan::config::load_or_default;
/// use reachscan::scanner::run_scan;
/// use reachscan::ScanMode;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_or_default(None)?;
/// let summary = run_scan(&config, ScanMode::Incremental, std::future::pending()).await?;
/// println!("artifact changed: {}", summary.artifact_changed);
/// # Ok(())
/// # }
/// ```
pub async fn run_scan<F>(config: &Config, mode: ScanMode, shutdown: F) -> Result<RunSummary, ScanError>
where
    F: Future<Output = ()>,
{
    let domains = load_domain_set(&config.paths.source_list)?;
    let store = JsonStateStore::new(&config.paths.state_file);
    let reachable = ReachableList::load(&config.paths.reachable_list)?;
    let prober = DnsProber::from_system_config(&config.probe)?;

    let mut orchestrator =
        Orchestrator::new(store, prober, reachable, ScanOptions::from_config(config));
    orchestrator.run_until(mode, &domains, shutdown).await
}
