//! Integration tests for the request throttle middleware.

use axum::http::StatusCode;

use crate::helpers::{DEFAULT_PEER, TestApp};

const PATH: &str = "/api/v1/auth/me";

fn limit_three() -> &'static str {
    "enabled = true\nlimit = 3\nwindow_seconds = 60"
}

#[tokio::test]
async fn test_fourth_request_in_window_is_rejected() {
    let app = TestApp::with_rate_limit(limit_three()).await;

    for expected_remaining in ["2", "1", "0"] {
        let response = app.request("GET", PATH, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.header("x-ratelimit-remaining"), Some(expected_remaining));
    }

    let response = app.request("GET", PATH, None, None).await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["error"], "RATE_LIMIT_EXCEEDED");
    assert_eq!(response.body["status"], 429);

    let retry_after: u64 = response
        .header("retry-after")
        .expect("Retry-After header")
        .parse()
        .expect("numeric Retry-After");
    assert!((1..=60).contains(&retry_after));
}

#[tokio::test]
async fn test_rejected_requests_are_not_counted() {
    let app = TestApp::with_rate_limit(limit_three()).await;

    for _ in 0..3 {
        app.request("GET", PATH, None, None).await;
    }
    for _ in 0..5 {
        let response = app.request("GET", PATH, None, None).await;
        assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    }
    assert_eq!(app.state.throttle.tracked_keys(), 1);
}

#[tokio::test]
async fn test_clients_are_isolated() {
    let app = TestApp::with_rate_limit(limit_three()).await;

    for _ in 0..4 {
        app.request("GET", PATH, None, None).await;
    }

    let other = app
        .send("GET", PATH, None, None, "198.51.100.20:1234", &[])
        .await;
    assert_eq!(other.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_forwarded_for_ignored_by_default() {
    let app = TestApp::with_rate_limit(limit_three()).await;

    for i in 0..4 {
        let spoofed = format!("203.0.113.{i}");
        let response = app
            .send("GET", PATH, None, None, DEFAULT_PEER, &[("x-forwarded-for", spoofed.as_str())])
            .await;
        if i < 3 {
            assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        } else {
            assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
        }
    }
}

#[tokio::test]
async fn test_forwarded_for_used_when_trusted() {
    let app = TestApp::with_rate_limit(
        "enabled = true\nlimit = 1\nwindow_seconds = 60\ntrust_forwarded_for = true",
    )
    .await;

    for i in 0..3 {
        let client = format!("203.0.113.{i}, 10.0.0.1");
        let response = app
            .send("GET", PATH, None, None, DEFAULT_PEER, &[("x-forwarded-for", client.as_str())])
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
    assert_eq!(app.state.throttle.tracked_keys(), 3);
}

#[tokio::test]
async fn test_disabled_throttle_admits_everything() {
    let app = TestApp::with_rate_limit("enabled = false\nlimit = 1\nwindow_seconds = 60").await;

    for _ in 0..5 {
        let response = app.request("GET", PATH, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(response.header("x-ratelimit-remaining").is_none());
    }
}

#[tokio::test]
async fn test_health_is_throttled_but_answers() {
    let app = TestApp::with_rate_limit("enabled = true\nlimit = 1\nwindow_seconds = 60").await;

    let response = app.request("GET", "/api/v1/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["database"], "unavailable");

    let response = app.request("GET", "/api/v1/health", None, None).await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
}
