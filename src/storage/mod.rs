//! Storage module for persisting scan state
//!
//! This module handles:
//! - The `StateStore` contract used by the orchestrator
//! - A JSON file implementation with write-to-temp-then-rename semantics
//! - The shared atomic replace helper also used for the reachable artifact

mod atomic;
mod json;
mod traits;

pub use atomic::write_atomic;
pub use json::JsonStateStore;
pub use traits::{StateStore, StorageError, StorageResult};
