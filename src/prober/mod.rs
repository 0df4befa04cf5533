//! Reachability prober
//!
//! A prober answers one question per call: does this domain resolve within
//! the given timeout? Resolution failure is an ordinary
//! [`ProbeOutcome::Unreachable`] result. Only a resolver that cannot work at
//! all is reported as a [`ProbeError`], and that error is fatal to the run.

mod dns;

pub use dns::DnsProber;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Classification of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    /// Resolution succeeded within the timeout
    Reachable,

    /// Resolution failed, returned no addresses, or timed out
    Unreachable,
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable)
    }
}

/// Errors that make probing impossible
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("DNS resolution unavailable: {0}")]
    Environment(String),
}

/// Trait for reachability probe implementations
///
/// Implementations must not cache results; every call performs a fresh
/// resolution attempt bounded by `timeout`.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probes a single domain
    async fn probe(&self, domain: &str, timeout: Duration) -> Result<ProbeOutcome, ProbeError>;
}
