//! HTTP rendering of [`AppError`].
//!
//! Lives next to the error type so the `IntoResponse` impl sits in the
//! crate that owns `AppError`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// HTTP status code, repeated for clients that only see the body.
    pub status: u16,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Internal | ErrorKind::Database | ErrorKind::Configuration => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<&AppError> for ApiErrorResponse {
    fn from(err: &AppError) -> Self {
        let status = status_for(err.kind);
        // Storage and wiring failures never leak their details.
        let message = match err.kind {
            ErrorKind::Database | ErrorKind::Configuration => "Internal server error".to_string(),
            _ => err.message.clone(),
        };
        Self {
            error: err.kind.to_string(),
            message,
            status: status.as_u16(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind);

        if status.is_server_error() {
            match std::error::Error::source(&self) {
                Some(cause) => error!(kind = %self.kind, error = %self.message, cause = %cause, "Request failed"),
                None => error!(kind = %self.kind, error = %self.message, "Request failed"),
            }
        } else {
            debug!(kind = %self.kind, error = %self.message, "Request rejected");
        }

        let body = ApiErrorResponse::from(&self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Authentication), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Authorization), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::RateLimit), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_for(ErrorKind::Database), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_database_message_hidden() {
        let body = ApiErrorResponse::from(&AppError::database("relation \"users\" does not exist"));
        assert_eq!(body.error, "DATABASE_ERROR");
        assert_eq!(body.message, "Internal server error");
        assert_eq!(body.status, 500);
    }

    #[test]
    fn test_auth_body() {
        let body = ApiErrorResponse::from(&AppError::authentication("invalid or expired token"));
        assert_eq!(body.error, "UNAUTHORIZED");
        assert_eq!(body.message, "invalid or expired token");
        assert_eq!(body.status, 401);
    }

    #[test]
    fn test_into_response_sets_status() {
        let response = AppError::conflict("email already exists").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
