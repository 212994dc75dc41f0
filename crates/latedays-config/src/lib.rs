//! Course configuration parsing and validation for latedays
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Assignment deadlines anchored to a named course timezone
//! - Policy caps and request/refund windows
//! - Email routing and intake form choice mappings
//! - Validation with clear error messages

mod policy;
mod schema;
mod validation;

pub use policy::*;
pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<CourseConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<CourseConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    // Check version
    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    // Validate
    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(CourseConfig::from_raw(raw))
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
        config_version = 1
        timezone = "America/Chicago"

        [assignments."Homework 1"]
        deadline = "2021-08-29T17:00:00-05:00"

        [policy]
        max_late_days = 10
        max_late_days_per_assignment = 2
        request_period_in_days = 2
        refund_period_in_days = 7

        [email]
        course_email = "cool@school.edu"
    "#;

    #[test]
    fn parse_minimal_config() {
        let config = parse_config(MINIMAL).unwrap();
        assert_eq!(config.caps.max_late_days, 10);
        assert_eq!(config.deadlines.len(), 1);
    }

    #[test]
    fn reject_wrong_version() {
        let content = MINIMAL.replace("config_version = 1", "config_version = 99");
        let result = parse_config(&content);
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_timezone() {
        let content = MINIMAL.replace("America/Chicago", "Atlantis/Atlantis");
        let result = parse_config(&content);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.email.course_email, "cool@school.edu");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = load_config("/nonexistent/latedays.toml");
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
