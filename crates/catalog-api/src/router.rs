//! Route definitions for the catalog HTTP API.
//!
//! All routes are organized by domain and mounted under `/api/v1`.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// API version prefix.
pub const API_PREFIX: &str = "/api/v1";

/// Build the route tree. State is attached by [`crate::app::build_app`].
pub fn build_router() -> Router<AppState> {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(product_routes())
        .merge(category_routes())
        .merge(review_routes())
        .merge(wishlist_routes());

    Router::new().nest(API_PREFIX, api_routes)
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Registration, login, refresh, and the caller's own account
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route(
            "/auth/me",
            get(handlers::user::get_profile).put(handlers::user::update_profile),
        )
        .route("/auth/password", put(handlers::user::change_password))
}

/// User listing and admin user management
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/users", get(handlers::user::list_users))
        .route(
            "/auth/users/{id}",
            get(handlers::user::get_user).delete(handlers::user::delete_user),
        )
        .route("/auth/users/{id}/role", put(handlers::user::change_role))
}

/// Product CRUD and search
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::product::get_product)
                .put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
}

/// Category CRUD and membership
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/categories/distribution",
            get(handlers::category::distribution),
        )
        .route(
            "/categories/{id}",
            get(handlers::category::get_category)
                .put(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
        .route(
            "/categories/{id}/products",
            get(handlers::category::list_category_products),
        )
        .route(
            "/categories/{id}/products/{product_id}",
            post(handlers::category::add_product).delete(handlers::category::remove_product),
        )
}

/// Reviews
fn review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products/{id}/reviews",
            get(handlers::review::list_reviews).post(handlers::review::create_review),
        )
        .route("/reviews/count", get(handlers::review::review_counts))
        .route(
            "/reviews/{id}",
            get(handlers::review::get_review).delete(handlers::review::delete_review),
        )
}

/// The caller's wishlist
fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/products/wishlist", get(handlers::wishlist::list_wishlist))
        .route(
            "/products/wishlist/count",
            get(handlers::wishlist::wishlist_counts),
        )
        .route(
            "/products/wishlist/{product_id}",
            post(handlers::wishlist::add_to_wishlist)
                .delete(handlers::wishlist::remove_from_wishlist),
        )
}
