//! Review handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use catalog_core::error::AppError;
use catalog_core::types::pagination::PageResponse;
use catalog_core::types::{ProductId, ReviewId};
use catalog_entity::review::Review;
use catalog_service::ReviewCounts;

use crate::dto::request::CreateReviewRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_body;
use crate::extractors::{AuthUser, PaginationParams, parse_id};
use crate::state::AppState;

/// GET /api/v1/products/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Review>>>, AppError> {
    let product_id: ProductId = parse_id(&id)?;
    let page = state
        .review_service
        .list(product_id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/v1/reviews/{id}
pub async fn get_review(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Review>>, AppError> {
    let id: ReviewId = parse_id(&id)?;
    let review = state.review_service.get(id).await?;
    Ok(Json(ApiResponse::ok(review)))
}

/// GET /api/v1/reviews/count
pub async fn review_counts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ReviewCounts>>, AppError> {
    let counts = state.review_service.counts(&auth).await?;
    Ok(Json(ApiResponse::ok(counts)))
}

/// POST /api/v1/products/{id}/reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Review>>), AppError> {
    let product_id: ProductId = parse_id(&id)?;
    validate_body(&req)?;

    let review = state
        .review_service
        .create(&auth, product_id, req.rating, req.comment)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(review))))
}

/// DELETE /api/v1/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let id: ReviewId = parse_id(&id)?;

    state.review_service.delete(&auth, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Review deleted successfully",
    ))))
}
