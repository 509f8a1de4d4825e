//! Domain error types
//!
//! All errors surfaced by the library are domain-specific and don't expose
//! third-party types (HTTP client, TOML, regex engine).

use thiserror::Error;

/// Main cvscrub error type
#[derive(Debug, Error)]
pub enum ScrubError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redaction was requested without a semantic oracle
    #[error("Oracle not configured: a semantic oracle client is required for redaction")]
    OracleNotConfigured,

    /// Oracle call or payload errors
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// Pattern library errors (bad regex, unknown category, malformed file)
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Audit log errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Oracle-specific errors
///
/// Raised by [`crate::adapters::llm::Oracle`] implementations and by the
/// entity payload parser.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Client misconfiguration (missing key, bad URL)
    #[error("Invalid oracle configuration: {0}")]
    Config(String),

    /// Transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response from the provider
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Response body could not be interpreted
    #[error("Failed to parse oracle response: {0}")]
    Parse(String),

    /// Provider answered without any content
    #[error("Oracle returned an empty response")]
    EmptyResponse,
}

impl OracleError {
    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            OracleError::Network(_) | OracleError::Timeout(_) => true,
            OracleError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

// Conversion implementations for common error types

impl From<std::io::Error> for ScrubError {
    fn from(err: std::io::Error) -> Self {
        ScrubError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ScrubError {
    fn from(err: serde_json::Error) -> Self {
        ScrubError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ScrubError {
    fn from(err: toml::de::Error) -> Self {
        ScrubError::Configuration(format!("TOML parsing error: {err}"))
    }
}

impl From<regex::Error> for ScrubError {
    fn from(err: regex::Error) -> Self {
        ScrubError::Pattern(format!("Invalid regex: {err}"))
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OracleError::Timeout(err.to_string())
        } else if err.is_decode() {
            OracleError::Parse(err.to_string())
        } else {
            OracleError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(err: serde_json::Error) -> Self {
        OracleError::Parse(err.to_string())
    }
}
