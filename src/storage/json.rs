//! JSON file storage implementation
//!
//! This module provides a file-backed implementation of the StateStore trait.

use crate::state::ScanState;
use crate::storage::atomic::write_atomic;
use crate::storage::traits::{StateStore, StorageError, StorageResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Scan state persisted as a pretty-printed JSON document
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    /// Creates a store backed by the file at `path`
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Returns the location of the state file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> StorageResult<ScanState> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "No state file at {}, starting with empty state",
                    self.path.display()
                );
                return Ok(ScanState::new());
            }
            Err(e) => return Err(e.into()),
        };

        let state: ScanState =
            serde_json::from_str(&content).map_err(|source| StorageError::StateCorrupt {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "Loaded state with {} checked domains from {}",
            state.checked_domains.len(),
            self.path.display()
        );
        Ok(state)
    }

    fn save(&mut self, state: &ScanState) -> StorageResult<()> {
        let mut json = serde_json::to_string_pretty(state)?;
        json.push('\n');
        write_atomic(&self.path, json.as_bytes())?;

        tracing::debug!(
            "Saved state with {} checked domains to {}",
            state.checked_domains.len(),
            self.path.display()
        );
        Ok(())
    }
}
