//! Error types for contract checks against the image API.
//!
//! Only unexpected outcomes are errors. A 400 or 404 that a
//! [`ResponseSpec`](crate::response::ResponseSpec) asks for is a passing
//! check, not an [`ApiError`].
//!
//! # Error Types
//!
//! - Configuration errors (missing token, malformed base URL or path template)
//! - Transport failures (connection refused, TLS, broken body)
//! - Response bodies that are not the JSON the caller asked for
//! - Contract mismatches (wrong status or field value)
//! - Unreadable fixture files
//!
//! # Example
//!
//! ```rust
//! use imgur_contract::{ApiError, ApiResult};
//!
//! fn require_token(token: &str) -> ApiResult<&str> {
//!     if token.is_empty() {
//!         return Err(ApiError::configuration_error("access token is empty"));
//!     }
//!     Ok(token)
//! }
//! ```

use crate::logging::{log_error, log_warn};
use std::path::PathBuf;
use thiserror::Error;

/// High-level categorization of errors for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The suite itself is misconfigured (token, URL, fixture).
    Client,

    /// The network or the remote service misbehaved.
    External,

    /// The service answered, but not the way the contract says it should.
    Contract,
}

/// Severity level for logging decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The run cannot continue.
    Error,

    /// A single check failed; other checks may still pass.
    Warning,
}

/// Convenient result type for contract operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// A single failed body or status expectation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectationFailure {
    /// Dotted JSON path, or `"status"` for the status code.
    pub path: String,
    /// Human readable description of what was expected.
    pub expected: String,
    /// What the response actually carried.
    pub actual: String,
}

impl std::fmt::Display for ExpectationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.path, self.expected, self.actual
        )
    }
}

fn join_failures(failures: &[ExpectationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur while running a contract check.
///
/// | Variant | Category |
/// |---------|----------|
/// | `ConfigurationError` | Client |
/// | `FixtureError` | Client |
/// | `RequestFailed` | External |
/// | `ResponseParsingError` | External |
/// | `ExpectationFailed` | Contract |
#[derive(Error, Debug)]
pub enum ApiError {
    /// Suite configuration is invalid or incomplete.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP exchange did not complete.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The response body could not be read as the requested shape.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the parsing failure.
        message: String,
    },

    /// The response did not satisfy its response specification.
    #[error("{method} {url} returned {status}, contract violated: {}", join_failures(.failures))]
    ExpectationFailed {
        /// HTTP method of the checked request.
        method: String,
        /// Full URL of the checked request.
        url: String,
        /// Status code the service answered with.
        status: u16,
        /// Every expectation that did not hold.
        failures: Vec<ExpectationFailure>,
    },

    /// A fixture file could not be read.
    #[error("Fixture {} unreadable: {source}", .path.display())]
    FixtureError {
        /// Path of the fixture.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Get the error category for reporting.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::FixtureError { .. } => ErrorCategory::Client,
            Self::RequestFailed { .. } => ErrorCategory::External,
            Self::ResponseParsingError { .. } => ErrorCategory::External,
            Self::ExpectationFailed { .. } => ErrorCategory::Contract,
        }
    }

    /// Get the error severity for logging.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } => ErrorSeverity::Error,
            Self::FixtureError { .. } => ErrorSeverity::Error,
            Self::RequestFailed { .. } => ErrorSeverity::Error,
            Self::ResponseParsingError { .. } => ErrorSeverity::Warning,
            Self::ExpectationFailed { .. } => ErrorSeverity::Warning,
        }
    }

    /// The mismatches carried by an `ExpectationFailed`, empty otherwise.
    pub fn failures(&self) -> &[ExpectationFailure] {
        match self {
            Self::ExpectationFailed { failures, .. } => failures,
            _ => &[],
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Contract suite configuration invalid"
        );
        Self::ConfigurationError { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "HTTP request execution failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing_error",
            message = %message,
            "Response body format invalid"
        );
        Self::ResponseParsingError { message }
    }

    pub fn expectation_failed(
        method: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        failures: Vec<ExpectationFailure>,
    ) -> Self {
        let method = method.into();
        let url = url.into();
        log_warn!(
            error_type = "expectation_failed",
            method = %method,
            url = %url,
            status = status,
            failure_count = failures.len(),
            failures = %join_failures(&failures),
            "Response violated its specification"
        );
        Self::ExpectationFailed {
            method,
            url,
            status,
            failures,
        }
    }

    pub fn fixture_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        log_error!(
            error_type = "fixture_error",
            path = %path.display(),
            error = %source,
            "Fixture file could not be read"
        );
        Self::FixtureError { path, source }
    }
}
