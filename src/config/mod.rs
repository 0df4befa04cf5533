//! Configuration module for reachscan
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a missing file simply
//! means [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use reachscan::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("reachscan.toml")).unwrap();
//! println!("Probe timeout: {}ms", config.probe.timeout_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, PathsConfig, ProbeConfig, ScanConfig};

// Re-export parser and validation functions
pub use parser::{load_config, load_or_default, parse_config};
pub use validation::validate;
