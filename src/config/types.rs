use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for reachscan
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub probe: ProbeConfig,
    pub scan: ScanConfig,
}

/// Locations of the input list, the output artifact and the state file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Hosts-format blocklist to read domains from
    #[serde(rename = "source-list")]
    pub source_list: PathBuf,

    /// Artifact listing every domain confirmed reachable
    #[serde(rename = "reachable-list")]
    pub reachable_list: PathBuf,

    /// JSON file holding the persisted scan state
    #[serde(rename = "state-file")]
    pub state_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_list: PathBuf::from("hosts.txt"),
            reachable_list: PathBuf::from("reachable-hosts.txt"),
            state_file: PathBuf::from("scan_state.json"),
        }
    }
}

/// DNS probe behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Per-attempt resolution timeout (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Retries of the same query after the first attempt times out
    pub retries: u32,

    /// Maximum number of probes in flight at once
    pub concurrency: u32,

    /// Consecutive domains with no nameserver response before the resolver
    /// is declared unusable (0 = never)
    #[serde(rename = "unanswered-limit")]
    pub unanswered_limit: u32,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 2000,
            retries: 1,
            concurrency: 1,
            unanswered_limit: 32,
        }
    }
}

/// Run-level behaviour of the orchestrator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Persist progress every N probed domains (0 = only at run end)
    #[serde(rename = "checkpoint-interval")]
    pub checkpoint_interval: u32,

    /// Global deadline for one run in seconds (0 = unbounded)
    #[serde(rename = "max-run-seconds")]
    pub max_run_seconds: u64,

    /// Log a progress line every N probed domains
    #[serde(rename = "progress-interval")]
    pub progress_interval: u32,
}

impl ScanConfig {
    /// Returns the run deadline, if one is configured
    pub fn max_run_time(&self) -> Option<Duration> {
        (self.max_run_seconds > 0).then(|| Duration::from_secs(self.max_run_seconds))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            checkpoint_interval: 0,
            max_run_seconds: 0,
            progress_interval: 100,
        }
    }
}
