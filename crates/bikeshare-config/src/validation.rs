//! Custom field validators

use tracing_subscriber::EnvFilter;
use validator::ValidationError;

/// Validate a log filter: a level name (`info`) or `tracing` directives
/// (`info,bikeshare_data=trace`), exactly as the subscriber will parse it
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let level = level.trim();
    if level.is_empty() {
        return Err(ValidationError::new("empty_log_level"));
    }
    EnvFilter::try_new(level)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_log_level"))
}

/// Validate a bare file name: no directory components, no traversal
pub fn validate_file_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("empty_file_name"));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ValidationError::new("file_name_has_path"));
    }
    validate_file_path(name)
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon is allowed for Windows drive letters (C:\)
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}
