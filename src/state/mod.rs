//! State module for tracking scan progress across runs
//!
//! # Components
//!
//! - `ScanState`: The persisted record of which domains were checked and when
//! - `ScanStats`: Aggregate counters carried in the state
//! - `ScanMode`: Selects between full and incremental planning

mod scan_mode;
mod scan_state;

// Re-export main types
pub use scan_mode::ScanMode;
pub use scan_state::{ScanState, ScanStats};
