//! Integration tests for the authentication and authorization pipeline.

use axum::http::StatusCode;
use serde_json::json;

use catalog_entity::user::UserRole;

use crate::helpers::{DEFAULT_PEER, TestApp};

const ME: &str = "/api/v1/auth/me";

#[tokio::test]
async fn test_missing_credential_rejected() {
    let app = TestApp::new().await;

    let response = app.request("GET", ME, None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
    assert_eq!(response.body["status"], 401);
    assert_eq!(response.message(), "authorization header is required");
}

#[tokio::test]
async fn test_malformed_credential_rejected() {
    let app = TestApp::new().await;
    let token = app.access_token(1, "user@example.com", UserRole::User);

    for header in [
        format!("Token {token}"),
        format!("Bearer {token} extra"),
        format!("bearer {token}"),
        "Bearer".to_string(),
    ] {
        let response = app
            .send("GET", ME, None, Some(&header), DEFAULT_PEER, &[])
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "header: {header}");
        assert_eq!(response.message(), "invalid authorization header format");
    }
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = TestApp::new().await;

    let response = app.request("GET", ME, None, Some("not.a.jwt")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid or expired token");
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = TestApp::new().await;
    let refresh = app.refresh_token(1);

    let response = app.request("GET", ME, None, Some(&refresh)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid or expired token");
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let app = TestApp::new().await;
    let user = app.access_token(2, "user@example.com", UserRole::User);
    let admin = app.access_token(2, "user@example.com", UserRole::Admin);

    // Admin claims with the user token's signature.
    let forged = format!(
        "{}.{}",
        admin.rsplit_once('.').expect("three parts").0,
        user.rsplit_once('.').expect("three parts").1
    );

    let response = app
        .request("PUT", "/api/v1/auth/users/3/role", Some(json!({"role": "admin"})), Some(&forged))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_admin_cannot_change_roles() {
    let app = TestApp::new().await;
    app.add_identity(2, "user@example.com", UserRole::User);
    app.add_identity(3, "other@example.com", UserRole::User);
    let token = app.access_token(2, "user@example.com", UserRole::User);

    let response = app
        .request("PUT", "/api/v1/auth/users/3/role", Some(json!({"role": "admin"})), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
    assert_eq!(response.message(), "Access denied: insufficient permissions");
}

#[tokio::test]
async fn test_non_admin_cannot_create_products() {
    let app = TestApp::new().await;
    let token = app.access_token(2, "user@example.com", UserRole::User);

    let response = app
        .request(
            "POST",
            "/api/v1/products",
            Some(json!({"name": "Widget", "price": 9.5})),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_promotes_user() {
    let app = TestApp::new().await;
    app.add_identity(1, "admin@example.com", UserRole::Admin);
    app.add_identity(2, "user@example.com", UserRole::User);
    let token = app.access_token(1, "admin@example.com", UserRole::Admin);

    let response = app
        .request("PUT", "/api/v1/auth/users/2/role", Some(json!({"role": "ADMIN"})), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["id"], 2);
    assert_eq!(response.body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_demoted_admin_token_still_passes_coarse_check_but_is_refused() {
    let app = TestApp::new().await;
    app.add_identity(1, "former@example.com", UserRole::User);
    app.add_identity(2, "user@example.com", UserRole::User);
    // Issued while identity 1 was still an admin.
    let stale = app.access_token(1, "former@example.com", UserRole::Admin);

    let ctx = catalog_auth::IdentityContext::resolve(
        app.state.tokens.verify_access(&stale).expect("token verifies"),
    );
    assert!(app.state.gate.authorize(&ctx, &[UserRole::Admin]));

    let response = app
        .request("PUT", "/api/v1/auth/users/2/role", Some(json!({"role": "admin"})), Some(&stale))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", "/api/v1/auth/users/2", None, Some(&stale))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.identities.len(), 2);
}

#[tokio::test]
async fn test_deleted_admin_is_refused() {
    let app = TestApp::new().await;
    app.add_identity(2, "user@example.com", UserRole::User);
    let orphan = app.access_token(1, "gone@example.com", UserRole::Admin);

    let response = app
        .request("PUT", "/api/v1/auth/users/2/role", Some(json!({"role": "admin"})), Some(&orphan))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_role_change_of_unknown_user() {
    let app = TestApp::new().await;
    app.add_identity(1, "admin@example.com", UserRole::Admin);
    let token = app.access_token(1, "admin@example.com", UserRole::Admin);

    let response = app
        .request("PUT", "/api/v1/auth/users/99/role", Some(json!({"role": "user"})), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "user not found");
}

#[tokio::test]
async fn test_role_change_rejects_bad_input() {
    let app = TestApp::new().await;
    app.add_identity(1, "admin@example.com", UserRole::Admin);
    let token = app.access_token(1, "admin@example.com", UserRole::Admin);

    let response = app
        .request("PUT", "/api/v1/auth/users/2/role", Some(json!({"role": "owner"})), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request("PUT", "/api/v1/auth/users/abc/role", Some(json!({"role": "user"})), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid ID: abc");
}

#[tokio::test]
async fn test_admin_deletes_user_but_not_admin() {
    let app = TestApp::new().await;
    app.add_identity(1, "admin@example.com", UserRole::Admin);
    app.add_identity(2, "user@example.com", UserRole::User);
    app.add_identity(3, "root@example.com", UserRole::Admin);
    let token = app.access_token(1, "admin@example.com", UserRole::Admin);

    let response = app
        .request("DELETE", "/api/v1/auth/users/3", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "cannot delete admin user");

    let response = app
        .request("DELETE", "/api/v1/auth/users/2", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.identities.len(), 2);
}
