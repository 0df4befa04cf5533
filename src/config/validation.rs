use crate::config::types::{Config, PathsConfig, ProbeConfig, ScanConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_paths_config(&config.paths)?;
    validate_probe_config(&config.probe)?;
    validate_scan_config(&config.scan)?;
    Ok(())
}

/// Validates file locations
fn validate_paths_config(config: &PathsConfig) -> Result<(), ConfigError> {
    for (name, path) in [
        ("source-list", &config.source_list),
        ("reachable-list", &config.reachable_list),
        ("state-file", &config.state_file),
    ] {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    // The artifact and state are rewritten by atomic replace, so neither may
    // alias the source list or each other
    if config.source_list == config.reachable_list
        || config.source_list == config.state_file
        || config.reachable_list == config.state_file
    {
        return Err(ConfigError::Validation(
            "source-list, reachable-list and state-file must be distinct paths".to_string(),
        ));
    }

    Ok(())
}

/// Validates DNS probe configuration
fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.timeout_ms < 100 || config.timeout_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "timeout-ms must be between 100 and 60000, got {}",
            config.timeout_ms
        )));
    }

    if config.retries > 5 {
        return Err(ConfigError::Validation(format!(
            "retries must be <= 5, got {}",
            config.retries
        )));
    }

    if config.concurrency < 1 || config.concurrency > 256 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 256, got {}",
            config.concurrency
        )));
    }

    Ok(())
}

/// Validates run-level configuration
fn validate_scan_config(config: &ScanConfig) -> Result<(), ConfigError> {
    if config.progress_interval < 1 {
        return Err(ConfigError::Validation(
            "progress-interval must be >= 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_probe_timeout_bounds() {
        let mut probe = ProbeConfig::default();
        probe.timeout_ms = 99;
        assert!(validate_probe_config(&probe).is_err());

        probe.timeout_ms = 100;
        assert!(validate_probe_config(&probe).is_ok());

        probe.timeout_ms = 60_001;
        assert!(validate_probe_config(&probe).is_err());
    }

    #[test]
    fn test_validate_probe_concurrency_and_retries() {
        let mut probe = ProbeConfig::default();
        probe.concurrency = 0;
        assert!(validate_probe_config(&probe).is_err());

        probe.concurrency = 256;
        assert!(validate_probe_config(&probe).is_ok());

        probe.retries = 6;
        assert!(validate_probe_config(&probe).is_err());
    }

    #[test]
    fn test_validate_paths_must_differ() {
        let mut paths = PathsConfig::default();
        paths.state_file = paths.reachable_list.clone();
        assert!(validate_paths_config(&paths).is_err());

        let mut paths = PathsConfig::default();
        paths.source_list = PathBuf::new();
        assert!(validate_paths_config(&paths).is_err());
    }

    #[test]
    fn test_validate_progress_interval() {
        let mut scan = ScanConfig::default();
        scan.progress_interval = 0;
        assert!(validate_scan_config(&scan).is_err());
    }
}
