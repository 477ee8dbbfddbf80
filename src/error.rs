//! Error types for newsgate
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for newsgate
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Errors
    // ============================================================================
    /// A mandatory request parameter was absent. Surfaced to callers as 400.
    #[error("Missing {field}")]
    MissingParameter { field: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("{message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Upstream Errors
    // ============================================================================
    /// The provider answered with a non-success status. Status and message
    /// are relayed to the caller unchanged.
    #[error("Upstream {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Network-level failure talking to the provider. Never retried.
    #[error("Server error: {0}")]
    Transport(#[from] reqwest::Error),

    // ============================================================================
    // Preference Errors
    // ============================================================================
    #[error("Preference error: {message}")]
    Preference { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a missing-parameter error.
    ///
    /// `field` is the human-readable field name (e.g. "country code"), so
    /// the rendered message reads "Missing country code".
    pub fn missing_parameter(field: impl Into<String>) -> Self {
        Self::MissingParameter {
            field: field.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an upstream error relaying the provider's status and message
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Create a preference error
    pub fn preference(message: impl Into<String>) -> Self {
        Self::Preference {
            message: message.into(),
        }
    }

    /// The HTTP status this error surfaces as at the forwarder boundary.
    ///
    /// Upstream errors relay the provider's own status; everything that is
    /// not the caller's fault is a 500.
    pub fn status(&self) -> u16 {
        match self {
            Error::MissingParameter { .. } => 400,
            Error::Upstream { status, .. } => *status,
            _ => 500,
        }
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::MissingParameter { .. })
    }
}

/// Result type alias for newsgate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::missing_parameter("country code");
        assert_eq!(err.to_string(), "Missing country code");

        let err = Error::missing_parameter("search query");
        assert_eq!(err.to_string(), "Missing search query");

        let err = Error::config("API key not configured");
        assert_eq!(err.to_string(), "API key not configured");

        let err = Error::upstream(422, "UnprocessableEntity");
        assert_eq!(err.to_string(), "Upstream 422: UnprocessableEntity");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::missing_parameter("country code").status(), 400);
        assert_eq!(Error::config("API key not configured").status(), 500);
        assert_eq!(Error::upstream(429, "rate limited").status(), 429);
        assert_eq!(Error::upstream(404, "no such category").status(), 404);
        assert_eq!(Error::Other("boom".into()).status(), 500);
    }

    #[test]
    fn test_is_client_error() {
        assert!(Error::missing_parameter("search query").is_client_error());
        assert!(!Error::config("missing key").is_client_error());
        assert!(!Error::upstream(400, "bad").is_client_error());
    }
}
