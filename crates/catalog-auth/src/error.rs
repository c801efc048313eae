//! Authentication and authorization failures.

use std::time::Duration;

use catalog_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Client-facing message for every token verification failure.
pub const INVALID_TOKEN_MESSAGE: &str = "invalid or expired token";

/// Failures of the token service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Header unreadable, algorithm not HS256, or signature mismatch.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The `exp` claim is in the past.
    #[error("token has expired")]
    Expired,
    /// Not a three-part token, or claims absent or wrongly typed.
    #[error("token claims are malformed")]
    MalformedClaims,
    /// Signing a new token failed.
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Failures of the request authentication pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header.
    #[error("authorization header is required")]
    MissingCredential,
    /// Header present but not `Bearer <token>`.
    #[error("invalid authorization header format")]
    MalformedCredential,
    /// The bearer token failed verification.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// The caller's role is not in the allow-list.
    #[error("Access denied: insufficient permissions")]
    InsufficientRole,
    /// The client exhausted its request window.
    #[error("rate limit exceeded, retry in {}s", .retry_after.as_secs())]
    RateLimitExceeded {
        /// Time until the client's window resets.
        retry_after: Duration,
    },
    /// The identity store could not answer a freshness check.
    #[error("identity lookup failed: {0}")]
    UpstreamLookupFailure(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential | AuthError::MalformedCredential => {
                AppError::new(ErrorKind::Authentication, err.to_string())
            }
            AuthError::Token(TokenError::Signing(_)) => {
                AppError::with_source(ErrorKind::Internal, "Failed to issue token", err)
            }
            AuthError::Token(_) => AppError::with_source(
                ErrorKind::Authentication,
                INVALID_TOKEN_MESSAGE,
                err,
            ),
            AuthError::InsufficientRole => AppError::new(ErrorKind::Authorization, err.to_string()),
            AuthError::RateLimitExceeded { .. } => {
                AppError::new(ErrorKind::RateLimit, err.to_string())
            }
            AuthError::UpstreamLookupFailure(_) => {
                AppError::with_source(ErrorKind::Internal, "Failed to verify permissions", err)
            }
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AuthError::Token(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures_share_one_message() {
        for token_err in [
            TokenError::Expired,
            TokenError::InvalidSignature,
            TokenError::MalformedClaims,
        ] {
            let app: AppError = AuthError::Token(token_err).into();
            assert!(app.is(ErrorKind::Authentication));
            assert_eq!(app.message, INVALID_TOKEN_MESSAGE);
        }
    }

    #[test]
    fn test_kind_mapping() {
        let forbidden: AppError = AuthError::InsufficientRole.into();
        assert!(forbidden.is(ErrorKind::Authorization));

        let upstream: AppError = AuthError::UpstreamLookupFailure("timeout".into()).into();
        assert!(upstream.is(ErrorKind::Internal));
        assert!(!upstream.message.contains("timeout"));

        let missing: AppError = AuthError::MissingCredential.into();
        assert_eq!(missing.message, "authorization header is required");

        let limited: AppError = AuthError::RateLimitExceeded {
            retry_after: Duration::from_secs(12),
        }
        .into();
        assert!(limited.is(ErrorKind::RateLimit));
        assert!(limited.message.contains("12s"));
    }
}
