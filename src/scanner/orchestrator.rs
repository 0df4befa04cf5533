//! Scan orchestrator - drives one run from plan to persisted results
//!
//! This module contains the main scan loop, which:
//! - Loads the scan state and plans the work list
//! - Probes domains with a bounded number in flight
//! - Accumulates outcomes in memory, independent of completion order
//! - Writes the artifact (only when it grows) and then the state
//! - Persists completed work when the run is cancelled or hits its deadline

use crate::config::Config;
use crate::domain::DomainSet;
use crate::output::{ReachableList, RunSummary};
use crate::prober::{ProbeError, ProbeOutcome, Prober};
use crate::scanner::planner::{plan, WorkList};
use crate::state::{ScanMode, ScanState};
use crate::storage::StateStore;
use crate::ScanError;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Tuning knobs for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Timeout handed to the prober for each attempt
    pub timeout: Duration,

    /// Maximum probes in flight
    pub concurrency: usize,

    /// Persist progress every N probed domains (0 = only at run end)
    pub checkpoint_interval: usize,

    /// Log progress every N probed domains
    pub progress_interval: usize,

    /// Stop probing after this long and persist what completed
    pub max_run_time: Option<Duration>,
}

impl ScanOptions {
    /// Derives run options from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout: config.probe.timeout(),
            concurrency: config.probe.concurrency as usize,
            checkpoint_interval: config.scan.checkpoint_interval as usize,
            progress_interval: config.scan.progress_interval as usize,
            max_run_time: config.scan.max_run_time(),
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Outcomes gathered during a run
///
/// Sets rather than lists, so the persisted result does not depend on the
/// order in which probes finish.
#[derive(Debug, Default)]
struct RunProgress {
    checked: BTreeSet<String>,
    reachable: BTreeSet<String>,
}

impl RunProgress {
    fn record(&mut self, domain: String, outcome: ProbeOutcome) {
        tracing::debug!("{} -> {:?}", domain, outcome);
        if outcome.is_reachable() {
            self.reachable.insert(domain.clone());
        }
        self.checked.insert(domain);
    }
}

type ProbeTask = (String, Result<ProbeOutcome, ProbeError>);

/// Main scan orchestrator
///
/// Owns the state store and the reachable artifact for the duration of a run;
/// both are passed in explicitly so tests can point them at temp files and a
/// scripted prober.
pub struct Orchestrator<S, P> {
    store: S,
    prober: Arc<P>,
    reachable: ReachableList,
    options: ScanOptions,
}

impl<S, P> Orchestrator<S, P>
where
    S: StateStore,
    P: Prober + 'static,
{
    /// Creates a new orchestrator
    ///
    /// # Arguments
    ///
    /// * `store` - Where the scan state is loaded from and saved to
    /// * `prober` - Reachability prober invoked once per planned domain
    /// * `reachable` - The artifact as loaded at the start of the run
    /// * `options` - Timeout, concurrency and persistence settings
    pub fn new(store: S, prober: P, reachable: ReachableList, options: ScanOptions) -> Self {
        Self {
            store,
            prober: Arc::new(prober),
            reachable,
            options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn reachable_list(&self) -> &ReachableList {
        &self.reachable
    }

    /// Runs a scan to completion
    pub async fn run(
        &mut self,
        mode: ScanMode,
        domains: &DomainSet,
    ) -> Result<RunSummary, ScanError> {
        self.run_until(mode, domains, std::future::pending()).await
    }

    /// Runs a scan until it completes or `shutdown` resolves
    ///
    /// On shutdown (or when the configured deadline passes) in-flight probes
    /// are cancelled, every probe that already finished is persisted, and the
    /// summary is marked as interrupted. The mode's last-scan timestamp is
    /// only set when the whole work list was processed.
    ///
    /// Fatal errors (state corrupt, probe environment unusable, write
    /// failure) are returned without persisting this run's results.
    pub async fn run_until<F>(
        &mut self,
        mode: ScanMode,
        domains: &DomainSet,
        shutdown: F,
    ) -> Result<RunSummary, ScanError>
    where
        F: Future<Output = ()>,
    {
        let started_at = Utc::now();
        let clock = Instant::now();

        let base = self.store.load()?;
        let work = plan(domains, &base, mode);
        let initial_reachable = self.reachable.len();

        let mut summary = RunSummary::new(mode, started_at);
        summary.total_domains = domains.len();
        summary.planned = work.len();

        tracing::info!(
            "Starting {} scan: {} domains in source, {} previously checked, {} to probe",
            mode,
            domains.len(),
            base.checked_domains.len(),
            work.len()
        );

        let (progress, interrupted) = if work.is_empty() {
            tracing::info!("Nothing to probe");
            (RunProgress::default(), false)
        } else {
            let deadline = self.options.max_run_time;
            let stop = async move {
                match deadline {
                    Some(limit) => {
                        tokio::select! {
                            _ = shutdown => {}
                            _ = tokio::time::sleep(limit) => {
                                tracing::warn!("Run deadline of {:?} reached", limit);
                            }
                        }
                    }
                    None => shutdown.await,
                }
            };
            self.probe_all(&work, &base, mode, started_at, stop).await?
        };

        self.persist(&base, &progress, mode, started_at, !interrupted)?;

        summary.checked = progress.checked.len();
        summary.reachable = progress.reachable.len();
        summary.total_reachable = self.reachable.len();
        summary.newly_reachable = summary.total_reachable - initial_reachable;
        summary.artifact_changed = summary.newly_reachable > 0;
        summary.interrupted = interrupted;
        summary.duration = clock.elapsed();

        tracing::info!(
            "Scan finished in {:?}: {} checked, {} newly reachable, {} total reachable",
            summary.duration,
            summary.checked,
            summary.newly_reachable,
            summary.total_reachable
        );

        Ok(summary)
    }

    /// Probes the work list with at most `concurrency` probes in flight
    ///
    /// Returns the gathered outcomes and whether `stop` cut the run short.
    async fn probe_all<F>(
        &mut self,
        work: &WorkList,
        base: &ScanState,
        mode: ScanMode,
        started_at: DateTime<Utc>,
        stop: F,
    ) -> Result<(RunProgress, bool), ScanError>
    where
        F: Future<Output = ()>,
    {
        let mut progress = RunProgress::default();
        let mut pending = work.iter().cloned();
        let mut tasks: JoinSet<ProbeTask> = JoinSet::new();
        let clock = Instant::now();

        for domain in pending.by_ref().take(self.options.concurrency.max(1)) {
            self.spawn_probe(&mut tasks, domain);
        }

        tokio::pin!(stop);
        let mut interrupted = false;

        loop {
            let joined = tokio::select! {
                biased;
                _ = &mut stop => {
                    interrupted = true;
                    break;
                }
                joined = tasks.join_next() => joined,
            };

            let Some(joined) = joined else {
                break;
            };

            let (domain, result) = joined.map_err(|e| ScanError::Task(e.to_string()))?;
            // Dropping `tasks` on error aborts the remaining probes
            progress.record(domain, result?);

            if let Some(next) = pending.next() {
                self.spawn_probe(&mut tasks, next);
            }

            let done = progress.checked.len();
            if done % self.options.progress_interval.max(1) == 0 {
                let rate = done as f64 / clock.elapsed().as_secs_f64().max(f64::EPSILON);
                tracing::info!(
                    "Progress: {}/{} checked, {} reachable, {:.2} domains/sec",
                    done,
                    work.len(),
                    progress.reachable.len(),
                    rate
                );
            }

            let interval = self.options.checkpoint_interval;
            if interval > 0 && done % interval == 0 && done < work.len() {
                tracing::info!("Checkpoint after {} domains", done);
                self.persist(base, &progress, mode, started_at, false)?;
            }
        }

        if interrupted {
            tasks.abort_all();
            // Keep probes that finished before the abort landed
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((domain, result)) => progress.record(domain, result?),
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => return Err(ScanError::Task(e.to_string())),
                }
            }
            tracing::warn!(
                "Scan interrupted: {} of {} planned domains checked",
                progress.checked.len(),
                work.len()
            );
        }

        Ok((progress, interrupted))
    }

    fn spawn_probe(&self, tasks: &mut JoinSet<ProbeTask>, domain: String) {
        let prober = Arc::clone(&self.prober);
        let timeout = self.options.timeout;
        tasks.spawn(async move {
            let result = prober.probe(&domain, timeout).await;
            (domain, result)
        });
    }

    /// Writes the artifact (if it grew) and then the merged state
    ///
    /// The artifact goes first: a crash between the two writes leaves
    /// reachable domains listed but unchecked, so they are probed again.
    /// The two files are not replaced together. If the state write fails
    /// after the artifact grew, the stored `reachable` counter lags the
    /// artifact until the next run recounts it.
    fn persist(
        &mut self,
        base: &ScanState,
        progress: &RunProgress,
        mode: ScanMode,
        started_at: DateTime<Utc>,
        completed: bool,
    ) -> Result<(), ScanError> {
        self.reachable
            .extend_and_write(&progress.reachable, Utc::now())?;

        let mut state = base.clone();
        state.merge_checked(&progress.checked, started_at);
        state.scan_stats.total_checked =
            base.scan_stats.total_checked + progress.checked.len() as u64;
        state.scan_stats.reachable = self.reachable.len() as u64;
        if completed {
            state.mark_completed(mode, started_at);
        }

        self.store.save(&state)?;
        Ok(())
    }
}
