//! Error types for dns-tools
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for dns-tools operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dns-tools
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required credential or identifier was neither in the environment nor on the command line
    #[error("{0} is a required parameter.")]
    MissingParameter(String),

    /// The CSV input could not be parsed
    #[error("Invalid CSV provided!")]
    InvalidCsv {
        /// 1-based line number of the offending row
        line: usize,
    },

    /// File and terminal I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors (from provider APIs)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Zone or record set not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record set of a type the tools cannot transform
    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing parameter error for the given environment variable name
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create an invalid CSV error for a 1-based line number
    pub fn invalid_csv(line: usize) -> Self {
        Self::InvalidCsv { line }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an unsupported record type error
    pub fn unsupported(record_type: impl Into<String>) -> Self {
        Self::UnsupportedRecordType(record_type.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether this error means the zone or record set does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
