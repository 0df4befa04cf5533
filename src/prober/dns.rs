//! DNS prober backed by hickory-resolver
//!
//! This module handles:
//! - Building a resolver from the system configuration
//! - Bounded A/AAAA lookups with explicit retry
//! - Classifying lookup results as reachable, unreachable, or a broken resolver

use crate::config::ProbeConfig;
use crate::prober::{ProbeError, ProbeOutcome, Prober};
use async_trait::async_trait;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{ResolveError, ResolverBuilder, TokioResolver};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Prober that resolves domains with the system's DNS servers
pub struct DnsProber {
    resolver: TokioResolver,
    retries: u32,
    unanswered_limit: u32,
    /// Consecutive domains that got no reply from any nameserver
    unanswered_streak: AtomicU32,
}

impl DnsProber {
    /// Builds a prober from `/etc/resolv.conf` (or the platform equivalent)
    ///
    /// # Returns
    ///
    /// * `Ok(DnsProber)` - Resolver ready to use
    /// * `Err(ProbeError::Environment)` - No usable system resolver configuration
    pub fn from_system_config(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let builder = TokioResolver::builder_tokio().map_err(|e| {
            ProbeError::Environment(format!("failed to load system resolver configuration: {e}"))
        })?;

        Ok(Self::from_builder(builder, config))
    }

    /// Builds a prober that queries the given nameservers instead of the system ones
    pub fn with_resolver_config(resolver_config: ResolverConfig, config: &ProbeConfig) -> Self {
        let builder =
            TokioResolver::builder_with_config(resolver_config, TokioConnectionProvider::default());
        Self::from_builder(builder, config)
    }

    fn from_builder(
        mut builder: ResolverBuilder<TokioConnectionProvider>,
        config: &ProbeConfig,
    ) -> Self {
        let opts = builder.options_mut();
        opts.timeout = config.timeout();
        // Retries are driven by `probe` so each attempt is individually bounded
        opts.attempts = 0;
        opts.cache_size = 0;

        Self {
            resolver: builder.build(),
            retries: config.retries,
            unanswered_limit: config.unanswered_limit,
            unanswered_streak: AtomicU32::new(0),
        }
    }

    /// Records a domain that got no reply; errors once the limit is reached
    fn note_unanswered(&self, domain: &str) -> Result<(), ProbeError> {
        let streak = self.unanswered_streak.fetch_add(1, Ordering::SeqCst) + 1;
        if self.unanswered_limit > 0 && streak >= self.unanswered_limit {
            return Err(ProbeError::Environment(format!(
                "no nameserver replied for {streak} consecutive domains (last: {domain})"
            )));
        }
        Ok(())
    }
}

/// How a failed lookup is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupFailure {
    /// NXDOMAIN or an empty answer; definitive
    NoRecords,

    /// The nameserver replied with an error; retried, then unreachable
    ServerError,

    /// No reply within the timeout; retried, then unreachable
    Timeout,

    /// No nameserver could be reached at all; retried, then fatal
    Transport,
}

fn classify(error: &ResolveError) -> LookupFailure {
    if error.is_no_records_found() {
        return LookupFailure::NoRecords;
    }

    match error.proto() {
        Some(proto) if proto.is_io() || proto.is_no_connections() || proto.is_busy() => {
            LookupFailure::Transport
        }
        Some(proto) if matches!(proto.kind(), ProtoErrorKind::Timeout) => LookupFailure::Timeout,
        _ => LookupFailure::ServerError,
    }
}

/// Makes a name absolute so the resolver's search list is never applied
fn absolute_name(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    }
}

#[async_trait]
impl Prober for DnsProber {
    /// Resolves `domain` with up to `retries + 1` attempts
    ///
    /// When every attempt fails because no nameserver can be reached, or
    /// `unanswered-limit` domains in a row got no reply at all, the resolver
    /// itself is unusable and the probe reports [`ProbeError::Environment`]
    /// instead of a verdict on the domain.
    async fn probe(&self, domain: &str, timeout: Duration) -> Result<ProbeOutcome, ProbeError> {
        let name = absolute_name(domain);
        let mut transport_error = None;
        let mut answered = false;
        let mut timed_out = false;

        for attempt in 0..=self.retries {
            let failure = match tokio::time::timeout(timeout, self.resolver.lookup_ip(name.as_str()))
                .await
            {
                Ok(Ok(lookup)) => {
                    self.unanswered_streak.store(0, Ordering::SeqCst);
                    let outcome = if lookup.iter().next().is_some() {
                        ProbeOutcome::Reachable
                    } else {
                        ProbeOutcome::Unreachable
                    };
                    return Ok(outcome);
                }
                Ok(Err(e)) => {
                    let failure = classify(&e);
                    tracing::trace!(domain, attempt, error = %e, ?failure, "lookup failed");
                    if failure == LookupFailure::Transport {
                        transport_error = Some(e);
                    }
                    failure
                }
                Err(_) => {
                    tracing::trace!(domain, attempt, "lookup timed out");
                    LookupFailure::Timeout
                }
            };

            match failure {
                LookupFailure::NoRecords => {
                    self.unanswered_streak.store(0, Ordering::SeqCst);
                    return Ok(ProbeOutcome::Unreachable);
                }
                LookupFailure::ServerError => answered = true,
                LookupFailure::Timeout => timed_out = true,
                LookupFailure::Transport => {}
            }
        }

        if answered {
            self.unanswered_streak.store(0, Ordering::SeqCst);
            return Ok(ProbeOutcome::Unreachable);
        }

        match transport_error {
            Some(e) if !timed_out => Err(ProbeError::Environment(format!(
                "no nameserver reachable while resolving {domain}: {e}"
            ))),
            _ => {
                self.note_unanswered(domain)?;
                Ok(ProbeOutcome::Unreachable)
            }
        }
    }
}
