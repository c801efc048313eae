//! Wishlist handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use catalog_core::error::AppError;
use catalog_core::types::ProductId;
use catalog_core::types::pagination::PageResponse;
use catalog_entity::wishlist::WishlistEntry;
use catalog_service::WishlistCounts;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, PaginationParams, parse_id};
use crate::state::AppState;

/// GET /api/v1/products/wishlist
pub async fn list_wishlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<WishlistEntry>>>, AppError> {
    let page = state
        .wishlist_service
        .list(&auth, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/v1/products/wishlist/{product_id}
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let product_id: ProductId = parse_id(&product_id)?;
    let outcome = state.wishlist_service.add(&auth, product_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(outcome.message()))))
}

/// DELETE /api/v1/products/wishlist/{product_id}
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let product_id: ProductId = parse_id(&product_id)?;
    state.wishlist_service.remove(&auth, product_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Product removed from wishlist",
    ))))
}

/// GET /api/v1/products/wishlist/count
pub async fn wishlist_counts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<WishlistCounts>>, AppError> {
    let counts = state.wishlist_service.counts(&auth).await?;
    Ok(Json(ApiResponse::ok(counts)))
}
