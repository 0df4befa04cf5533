//! Storage traits and error types
//!
//! This module defines the trait interface for state backends and
//! associated error types.

use crate::state::ScanState;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// The state file exists but does not hold a valid scan state
    #[error("State file {} is corrupt: {source}", path.display())]
    StateCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for scan state backends
///
/// Implementations must never leave a partially written state behind: a
/// failed or interrupted `save` leaves the previous state intact.
pub trait StateStore {
    /// Loads the persisted state
    ///
    /// Returns an empty [`ScanState`] when nothing has been persisted yet and
    /// [`StorageError::StateCorrupt`] when the persisted state cannot be parsed.
    fn load(&self) -> StorageResult<ScanState>;

    /// Atomically replaces the persisted state
    fn save(&mut self, state: &ScanState) -> StorageResult<()>;
}
