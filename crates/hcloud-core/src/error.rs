//! Error types for Hetzner Cloud operations.
//!
//! Every failed call surfaces as an [`Error`]. Non-success HTTP statuses keep the
//! status code together with the provider's error body so callers can act on the
//! documented error codes (`not_found`, `locked`, `rate_limit_exceeded`, ...).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Hetzner Cloud operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The API answered with a non-success status.
    #[error("API error {status} ({code}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider error code (e.g. `not_found`)
        code: String,
        /// Human-readable error message
        message: String,
        /// Optional structured details attached by the provider
        details: Option<serde_json::Value>,
    },

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Could not connect to the API
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Any other transport failure
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Response body did not match the expected shape
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// Invalid endpoint URL or request path
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Invalid resource identifier
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Specialized result type for Hetzner Cloud operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error envelope returned by the API on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    /// Error details
    pub error: ApiErrorDetail,
}

/// Error detail as documented by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorDetail {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Error {
    /// Build an [`Error::Api`] from a failed response.
    ///
    /// The provider's `{"error": {...}}` envelope is kept as-is. Bodies in any other
    /// shape end up verbatim in `message` with the code `unknown`.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => Self::Api {
                status,
                code: parsed.error.code,
                message: parsed.error.message,
                details: parsed.error.details,
            },
            Err(_) => Self::Api {
                status,
                code: "unknown".to_string(),
                message: body.to_string(),
                details: None,
            },
        }
    }

    /// Returns the error code for this error type.
    ///
    /// API errors report the provider's own code.
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::Api { code, .. } => code,
            Self::Timeout(_) => "timeout",
            Self::Connection(_) => "connection_failed",
            Self::Http(_) => "http_error",
            Self::Parse(_) => "parse_error",
            Self::InvalidEndpoint(_) => "invalid_endpoint",
            Self::InvalidId(_) => "invalid_id",
            Self::Config(_) => "config_error",
            Self::Validation(_) => "validation_error",
        }
    }

    /// HTTP status of an API error, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the API reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. }) || self.error_code() == "not_found"
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}
