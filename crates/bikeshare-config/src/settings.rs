//! Application configuration structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Default listening port, matching the usual dashboard host port
pub const DEFAULT_PORT: u16 = 8501;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    #[validate]
    pub server: ServerConfig,

    /// Location of the CSV snapshots
    #[validate]
    pub data: DataConfig,

    /// Figure dimensions
    #[validate]
    pub chart: ChartConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    #[validate(length(min = 1, message = "Server host cannot be empty"))]
    pub host: String,

    /// Port to bind
    #[validate(range(min = 1, message = "Server port must be between 1 and 65535"))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Data file configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the CSV files. When unset the dashboard uses the
    /// `data/` directory shipped next to its sources.
    pub dir: Option<PathBuf>,

    /// Daily records file name
    #[validate(custom(
        function = "crate::validation::validate_file_name",
        message = "Daily data file must be a plain file name"
    ))]
    pub day_file: String,

    /// Hourly records file name
    #[validate(custom(
        function = "crate::validation::validate_file_name",
        message = "Hourly data file must be a plain file name"
    ))]
    pub hour_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: None,
            day_file: "data_day.csv".to_string(),
            hour_file: "data_hour.csv".to_string(),
        }
    }
}

/// Figure size configuration.
///
/// Every section is rendered at the same size; two-panel sections split the
/// width evenly.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartConfig {
    /// Figure width in pixels
    #[validate(range(min = 400, max = 8000, message = "Width must be between 400 and 8000 pixels"))]
    pub width: u32,

    /// Figure height in pixels
    #[validate(range(min = 200, max = 4000, message = "Height must be between 200 and 4000 pixels"))]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        // 35:15 figure proportions
        Self {
            width: 1750,
            height: 750,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log filter: a level (trace, debug, info, warn, error) or directives
    /// such as `info,bikeshare_data=debug`
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be a level name or a valid tracing filter"
    ))]
    pub level: String,

    /// Emit JSON lines instead of human readable output
    pub json: bool,

    /// Optional log file path
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Log file path contains invalid characters"
    ))]
    pub file: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl From<&LoggingSettings> for bikeshare_common::LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            json_format: settings.json,
            pretty_format: !settings.json && settings.file.is_none(),
            file_path: settings.file.clone(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.bind_address(), "127.0.0.1:8501");
        assert_eq!(config.data.day_file, "data_day.csv");
        assert_eq!(config.data.hour_file, "data_hour.csv");
        assert!(config.data.dir.is_none());
        assert_eq!((config.chart.width, config.chart.height), (1750, 750));
    }

    #[test]
    fn test_nested_validation_reports_field() {
        let mut config = Config::default();
        config.chart.width = 10;
        config.logging.level = "bikeshare_data=loud".to_string();

        let errors = config.validate().unwrap_err();
        let failed = errors.errors();
        assert!(failed.contains_key("chart"));
        assert!(failed.contains_key("logging"));
        assert!(!failed.contains_key("server"));
    }

    #[test]
    fn test_data_file_must_be_plain_name() {
        let mut config = Config::default();
        config.data.day_file = "../secrets/data_day.csv".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "server:\n  port: 9000\nchart:\n  height: 600\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.chart.height, 600);
        assert_eq!(config.chart.width, 1750);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_logging_settings_conversion() {
        let settings = LoggingSettings {
            level: "debug".to_string(),
            json: true,
            file: Some("dashboard.log".to_string()),
        };
        let logging: bikeshare_common::LoggingConfig = (&settings).into();

        assert_eq!(logging.level, "debug");
        assert!(logging.json_format);
        assert!(!logging.pretty_format);
        assert_eq!(logging.file_path.as_deref(), Some("dashboard.log"));
    }
}
