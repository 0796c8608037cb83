//! Error types for the Ponto Engine.
//!
//! The calculation pipeline itself never fails: anomalies found in clock data
//! are reported through [`Diagnostics`](crate::models::Diagnostics) on each
//! result. This module covers the fallible edges around it (loading and
//! validating policy files, and rejecting malformed requests).

use thiserror::Error;

/// The main error type for the Ponto Engine.
///
/// # Example
///
/// ```
/// use ponto_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/work_hours.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/work_hours.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value is outside the range the engine accepts.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A calculation request was structurally invalid.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// A description of what made the request invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidConfig`].
    pub fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/salary.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/salary.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/policy/work_hours.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/policy/work_hours.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::invalid_config("work_days_per_month", "must be greater than zero");
        assert_eq!(
            error.to_string(),
            "Invalid configuration field 'work_days_per_month': must be greater than zero"
        );
    }

    #[test]
    fn test_invalid_request_displays_message() {
        let error = EngineError::InvalidRequest {
            message: "month must be between 1 and 12".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid request: month must be between 1 and 12"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid() -> EngineResult<()> {
            Err(EngineError::invalid_config("regular_hours_per_day", "zero"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
