//! Common utilities and types for the bike sharing dashboard

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{DashboardError, Result};
pub use logging::{init_logging, LoggingConfig};
