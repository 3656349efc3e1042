//! Error handling module for schooladmin
//!
//! Provides the crate-level error type. Concern-specific errors
//! (`ValidationError`, `ApiError`, `WizardError`) live next to the code that
//! raises them and convert into `AdminError` at the edges.

use crate::api::ApiError;
use crate::sequencer::WizardError;
use crate::validator::ValidationError;
use thiserror::Error;

/// Main error type for schooladmin
#[derive(Error, Debug)]
pub enum AdminError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local draft validation failures
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Remote backend failures
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// Wizard sequencing errors (call in flight, wrong step, ...)
    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for schooladmin operations
pub type Result<T> = std::result::Result<T, AdminError>;

impl AdminError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::SchoolField;

    #[test]
    fn test_error_display() {
        let err = AdminError::config("api_base_url must use http or https");
        assert_eq!(
            err.to_string(),
            "Configuration error: api_base_url must use http or https"
        );

        let err: AdminError = ValidationError::PasswordMismatch.into();
        assert_eq!(err.to_string(), "Validation error: passwords do not match");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AdminError = io_err.into();
        assert!(matches!(err, AdminError::Io(_)));
    }

    #[test]
    fn test_nested_conversions() {
        let err: AdminError = ApiError::MissingIdentifier.into();
        assert!(matches!(err, AdminError::Api(_)));

        let err: AdminError = ValidationError::MissingField {
            field: SchoolField::City.label(),
        }
        .into();
        assert!(err.to_string().contains("City"));
    }
}
