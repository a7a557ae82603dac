//! Configuration loading utilities

use crate::Config;
use bikeshare_common::Result as DashboardResult;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "BIKESHARE_CONFIG_PATH";

/// Configuration files looked up in the working directory, in order
const DEFAULT_CONFIG_FILES: [&str; 2] = ["dashboard.yaml", "dashboard.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for bikeshare_common::DashboardError {
    fn from(err: ConfigError) -> Self {
        bikeshare_common::DashboardError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides.
    ///
    /// A relative `data.dir` is resolved against the directory containing the
    /// configuration file.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        if let Some(dir) = config.data.dir.take() {
            config.data.dir = Some(Self::resolve_relative(path, dir));
        }

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        info!(path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }

    /// Load configuration from the environment and the default file locations
    pub fn load() -> DashboardResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES.into_iter().map(Path::new).find(|p| p.exists()) {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DashboardResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply process environment overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides using an arbitrary variable lookup
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("BIKESHARE_HOST") {
            config.server.host = host;
        }

        if let Some(port) = lookup("BIKESHARE_PORT") {
            config.server.port = port.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: "BIKESHARE_PORT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(dir) = lookup("BIKESHARE_DATA_DIR") {
            config.data.dir = Some(PathBuf::from(dir));
        }

        if let Some(level) = lookup("BIKESHARE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = lookup("BIKESHARE_LOG_JSON") {
            config.logging.json = json.trim().parse().map_err(|e| ConfigError::EnvParseError {
                var: "BIKESHARE_LOG_JSON".to_string(),
                source: Box::new(e),
            })?;
        }

        Ok(())
    }

    /// Replace the log filter (e.g. from the command line) and revalidate,
    /// so it is held to the same rules as the file and environment
    pub fn override_log_level(config: &mut Config, level: impl Into<String>) -> Result<(), ConfigError> {
        config.logging.level = level.into();
        config.validate()?;
        Ok(())
    }

    fn resolve_relative(config_path: &Path, dir: PathBuf) -> PathBuf {
        if dir.is_absolute() {
            return dir;
        }
        match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(dir),
            _ => dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("BIKESHARE_HOST", "0.0.0.0"),
            ("BIKESHARE_PORT", "8080"),
            ("BIKESHARE_DATA_DIR", "/srv/bikeshare"),
            ("BIKESHARE_LOG_LEVEL", "debug"),
            ("BIKESHARE_LOG_JSON", "true"),
        ]);

        ConfigLoader::apply_overrides(&mut config, lookup).unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.data.dir, Some(PathBuf::from("/srv/bikeshare")));
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_log_filter_rules_match_across_sources() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides(&mut config, lookup_from(&[("BIKESHARE_LOG_LEVEL", "info,bikeshare_data=trace")]))
            .unwrap();
        assert!(config.validate().is_ok());

        ConfigLoader::override_log_level(&mut config, "bikeshare_graphs=debug").unwrap();
        assert_eq!(config.logging.level, "bikeshare_graphs=debug");

        let err = ConfigLoader::override_log_level(&mut config, "bikeshare_data=loud").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        ConfigLoader::apply_overrides(&mut config, lookup_from(&[("BIKESHARE_LOG_LEVEL", "bikeshare_data=loud")]))
            .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides(&mut config, |_| None).unwrap();
        assert_eq!(config.server.port, crate::settings::DEFAULT_PORT);
        assert!(config.data.dir.is_none());
    }

    #[test]
    fn test_bad_port_override_names_variable() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides(&mut config, lookup_from(&[("BIKESHARE_PORT", "eighty")]))
            .unwrap_err();

        match err {
            ConfigError::EnvParseError { var, .. } => assert_eq!(var, "BIKESHARE_PORT"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_relative_dir() {
        let resolved = ConfigLoader::resolve_relative(Path::new("/etc/bikeshare/dashboard.yaml"), PathBuf::from("data"));
        assert_eq!(resolved, PathBuf::from("/etc/bikeshare/data"));

        let absolute = ConfigLoader::resolve_relative(Path::new("/etc/bikeshare/dashboard.yaml"), PathBuf::from("/data"));
        assert_eq!(absolute, PathBuf::from("/data"));

        let bare = ConfigLoader::resolve_relative(Path::new("dashboard.yaml"), PathBuf::from("data"));
        assert_eq!(bare, PathBuf::from("data"));
    }
}
