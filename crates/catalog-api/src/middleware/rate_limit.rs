//! Fixed-window request throttle middleware.

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use catalog_auth::{AuthError, ThrottleDecision};
use catalog_core::error::AppError;

use crate::state::AppState;

/// Key used when no client address can be resolved.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Header carrying the remaining budget of an admitted request.
const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Admits or rejects the request based on the client's window.
pub async fn throttle_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let key = client_key(
        request.headers(),
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr),
        state.config.rate_limit.trust_forwarded_for,
    );

    match state.throttle.check(&key) {
        ThrottleDecision::Admitted { remaining } => {
            let mut response = next.run(request).await;
            response
                .headers_mut()
                .insert(REMAINING_HEADER, HeaderValue::from(remaining));
            response
        }
        ThrottleDecision::Rejected { retry_after } => {
            warn!(client = %key, retry_after_secs = retry_after.as_secs(), "Rate limit exceeded");
            rejection(retry_after)
        }
    }
}

/// Resolves the throttle key for a request.
///
/// The first `X-Forwarded-For` hop wins only when the deployment trusts its
/// proxy. Otherwise the socket peer address is used.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn rejection(retry_after: Duration) -> Response {
    let mut response = AppError::from(AuthError::RateLimitExceeded { retry_after }).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs(retry_after)));
    response
}

/// Whole seconds to wait, rounded up and never zero.
fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    secs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> Option<SocketAddr> {
        Some("10.0.0.7:51234".parse().unwrap())
    }

    #[test]
    fn test_peer_address_is_default_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));
        assert_eq!(client_key(&headers, peer(), false), "10.0.0.7");
    }

    #[test]
    fn test_forwarded_for_when_trusted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(client_key(&headers, peer(), true), "203.0.113.9");
    }

    #[test]
    fn test_unknown_without_peer() {
        assert_eq!(client_key(&HeaderMap::new(), None, true), UNKNOWN_CLIENT);
    }

    #[test]
    fn test_retry_after_rounds_up() {
        assert_eq!(retry_after_secs(Duration::from_millis(1500)), 2);
        assert_eq!(retry_after_secs(Duration::from_secs(57)), 57);
        assert_eq!(retry_after_secs(Duration::ZERO), 1);
    }
}
