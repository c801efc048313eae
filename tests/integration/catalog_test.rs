//! Routing and guard tests for wishlist and review endpoints.

use axum::http::StatusCode;

use catalog_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_wishlist_requires_credential() {
    let app = TestApp::new().await;

    for path in ["/api/v1/products/wishlist", "/api/v1/products/wishlist/count"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "path: {path}");
    }

    let response = app
        .request("POST", "/api/v1/products/wishlist/7", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wishlist_product_id_is_parsed() {
    let app = TestApp::new().await;
    let token = app.access_token(2, "user@example.com", UserRole::User);

    for method in ["POST", "DELETE"] {
        let response = app
            .request(method, "/api/v1/products/wishlist/abc", None, Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "method: {method}");
        assert_eq!(response.message(), "Invalid ID: abc");
    }
}

#[tokio::test]
async fn test_review_lookup_routes() {
    let app = TestApp::new().await;
    let token = app.access_token(2, "user@example.com", UserRole::User);

    let response = app
        .request("GET", "/api/v1/reviews/abc", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid ID: abc");

    let response = app.request("GET", "/api/v1/reviews/count", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
