//! Reachscan: incremental DNS reachability scanner for blocklists
//!
//! This crate reads a hosts-format blocklist, probes domains that have not been
//! checked before (or all of them in full mode), and maintains a durable list of
//! domains that resolved at least once, together with the per-domain scan state
//! that lets later runs skip work already done.

pub mod config;
pub mod domain;
pub mod output;
pub mod prober;
pub mod scanner;
pub mod state;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scan runs
///
/// Every variant is fatal to the run. Per-domain resolution failures are not
/// errors; they are reported as [`prober::ProbeOutcome::Unreachable`].
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Malformed source list {}: {source}", path.display())]
    MalformedSource {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Probe environment error: {0}")]
    ProbeEnvironment(#[from] prober::ProbeError),

    #[error("Probe task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use domain::{extract_domains, load_domain_set, DomainSet};
pub use prober::{DnsProber, ProbeOutcome, Prober};
pub use scanner::{plan, Orchestrator, ScanOptions, WorkList};
pub use state::{ScanMode, ScanState, ScanStats};
pub use storage::{JsonStateStore, StateStore};
