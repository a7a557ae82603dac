//! Configuration management for the bike sharing dashboard

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader, CONFIG_PATH_ENV};
pub use settings::{ChartConfig, Config, DataConfig, LoggingSettings, ServerConfig, DEFAULT_PORT};
