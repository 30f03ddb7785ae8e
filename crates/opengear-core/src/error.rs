//! Error types for Opengear operations.
//!
//! Only failures the caller cannot recover from by inspecting the response
//! are errors. Rejected logins, non-200 statuses and missing fields are
//! reported as absent values by the client, never through this type.

use thiserror::Error;

/// Main error type for Opengear operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The appliance could not be reached (DNS, refused connection, TLS, timeout)
    #[error("ConnectionError: {0}")]
    ConnectionError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Response body could not be decoded
    #[error("Failed to parse appliance response: {0}")]
    ParseError(String),
}

/// Specialized result type for Opengear operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionError(_) => "CONNECTION_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::ParseError(_) => "PARSE_ERROR",
        }
    }

    /// Returns true for transport-level failures.
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}

// All reqwest failures are transport failures to callers.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ConnectionError(format!("request timed out: {err}"))
        } else {
            Self::ConnectionError(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
