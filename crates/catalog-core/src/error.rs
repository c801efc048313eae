//! Unified application error types for the catalog API.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The HTTP layer turns the
//! [`ErrorKind`] into a status code.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Authentication failed (missing, malformed, invalid or expired credential).
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, etc.).
    Conflict,
    /// A rate limit was exceeded.
    RateLimit,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "UNAUTHORIZED"),
            Self::Authorization => write!(f, "FORBIDDEN"),
            Self::Validation => write!(f, "VALIDATION_ERROR"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::RateLimit => write!(f, "RATE_LIMIT_EXCEEDED"),
            Self::Internal => write!(f, "INTERNAL_ERROR"),
            Self::Database => write!(f, "DATABASE_ERROR"),
            Self::Configuration => write!(f, "CONFIGURATION_ERROR"),
        }
    }
}

/// The unified application error used throughout the catalog API.
///
/// Crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message. Safe to show to clients.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Whether this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_code() {
        let err = AppError::authentication("invalid or expired token");
        assert_eq!(err.to_string(), "UNAUTHORIZED: invalid or expired token");
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err = AppError::with_source(ErrorKind::Database, "query failed", io);
        assert!(std::error::Error::source(&err).is_some());

        let cloned = err.clone();
        assert!(cloned.is(ErrorKind::Database));
        assert!(cloned.source.is_none());
    }
}
