use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads the configuration file if one was given, otherwise the defaults
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[paths]
source-list = "lists/hosts"
reachable-list = "lists/reachable"
state-file = "state/scan.json"

[probe]
timeout-ms = 1500
retries = 2
concurrency = 16
unanswered-limit = 8

[scan]
checkpoint-interval = 500
max-run-seconds = 3600
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.paths.source_list, PathBuf::from("lists/hosts"));
        assert_eq!(config.paths.state_file, PathBuf::from("state/scan.json"));
        assert_eq!(config.probe.timeout_ms, 1500);
        assert_eq!(config.probe.retries, 2);
        assert_eq!(config.probe.concurrency, 16);
        assert_eq!(config.probe.unanswered_limit, 8);
        assert_eq!(config.scan.checkpoint_interval, 500);
        assert_eq!(config.scan.max_run_seconds, 3600);
        // Not given, falls back to its default
        assert_eq!(config.scan.progress_interval, 100);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.paths.source_list, PathBuf::from("hosts.txt"));
        assert_eq!(config.probe.timeout_ms, 2000);
        assert_eq!(config.probe.retries, 1);
        assert_eq!(config.probe.concurrency, 1);
        assert_eq!(config.probe.unanswered_limit, 32);
        assert!(config.scan.max_run_time().is_none());
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/reachscan.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[probe]\nconcurrency = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = load_or_default(None).unwrap();
        assert_eq!(
            config.paths.reachable_list,
            PathBuf::from("reachable-hosts.txt")
        );
    }
}
