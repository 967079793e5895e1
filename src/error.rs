//! Error types for photogrid
//!
//! This module defines the error hierarchy for the whole client.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for photogrid
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Credential Errors
    // ============================================================================
    #[error("Not authenticated: no credential available")]
    Unauthenticated,

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Request failed with HTTP {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("No base URL configured to resolve '{path}'")]
    MissingBaseUrl { path: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`] for view-level presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No credential was available
    Unauthenticated,
    /// The remote service rejected the request or could not be reached
    RequestFailed,
    /// Client configuration is unusable
    InvalidConfiguration,
    /// A relative path needed a base URL that was never configured
    MissingBaseUrl,
    /// Anything else
    Other,
}

impl Error {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a missing base URL error
    pub fn missing_base_url(path: impl Into<String>) -> Self {
        Self::MissingBaseUrl { path: path.into() }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a request failure from a status and response body
    pub fn request_failed(status: u16, body: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            body: body.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unauthenticated => ErrorKind::Unauthenticated,
            Error::RequestFailed { status, .. } if matches!(status, 401 | 403) => {
                ErrorKind::Unauthenticated
            }
            Error::RequestFailed { .. }
            | Error::Http(_)
            | Error::Timeout { .. }
            | Error::RateLimited { .. } => ErrorKind::RequestFailed,
            Error::InvalidConfiguration { .. }
            | Error::Config { .. }
            | Error::InvalidUrl(_)
            | Error::YamlParse(_) => ErrorKind::InvalidConfiguration,
            Error::MissingBaseUrl { .. } => ErrorKind::MissingBaseUrl,
            _ => ErrorKind::Other,
        }
    }

    /// Check if the transport layer may retry this error
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::RequestFailed { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for photogrid
pub type Result<T> = std::result::Result<T, Error>;
