//! Error types for Readify core
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for Readify core
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Domain Errors
    // ============================================================================
    #[error("Article '{id}' not found")]
    NotFound { id: String },

    #[error("No authenticated user session")]
    Unauthenticated,

    #[error("Some articles were not found ({missing} missing)")]
    PartialBatchFailure { missing: usize },

    #[error("Failed to load article '{id}': {source}")]
    FailFastBatchFailure {
        id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Operation cancelled: session was torn down")]
    Cancelled,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Payload of {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: u64, limit: u64 },

    // ============================================================================
    // Cache Errors
    // ============================================================================
    #[error("Cache error: {message}")]
    Cache { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a not-found error for an article id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a cache error
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Wrap the first failure of a fail-fast batch
    pub fn fail_fast(id: impl Into<String>, source: Error) -> Self {
        Self::FailFastBatchFailure {
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error means the requested document does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::HttpStatus { status, .. } => *status == 404,
            Error::FailFastBatchFailure { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Result type alias for Readify core
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

/// A display-ready error message plus its visibility flag.
///
/// This is what a presentation layer shows in its error popup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorNotice {
    /// Human-readable message
    pub message: String,
    /// Whether the notice should currently be shown
    pub visible: bool,
}

impl ErrorNotice {
    /// Create a visible notice
    pub fn show(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            visible: true,
        }
    }

    /// Create a visible notice from an error
    pub fn from_error(err: &Error) -> Self {
        Self::show(err.to_string())
    }

    /// Hide the notice, keeping the last message
    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::not_found("42");
        assert_eq!(err.to_string(), "Article '42' not found");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::PartialBatchFailure { missing: 2 };
        assert_eq!(err.to_string(), "Some articles were not found (2 missing)");
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::not_found("1").is_not_found());
        assert!(Error::http_status(404, "").is_not_found());
        assert!(Error::fail_fast("1", Error::not_found("1")).is_not_found());

        assert!(!Error::http_status(500, "").is_not_found());
        assert!(!Error::Unauthenticated.is_not_found());
    }

    #[test]
    fn test_fail_fast_keeps_source() {
        let err = Error::fail_fast("7", Error::not_found("7"));
        assert_eq!(
            err.to_string(),
            "Failed to load article '7': Article '7' not found"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }

    #[test]
    fn test_error_notice() {
        let mut notice = ErrorNotice::from_error(&Error::Unauthenticated);
        assert!(notice.visible);
        assert_eq!(notice.message, "No authenticated user session");

        notice.dismiss();
        assert!(!notice.visible);
        assert_eq!(notice.message, "No authenticated user session");

        assert!(!ErrorNotice::default().visible);
    }
}
