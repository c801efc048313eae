//! Category handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use catalog_core::error::AppError;
use catalog_core::types::pagination::PageResponse;
use catalog_core::types::{CategoryId, ProductId};
use catalog_entity::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};
use catalog_entity::product::Product;

use crate::dto::request::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_body;
use crate::extractors::{AuthUser, PaginationParams, parse_id};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Category>>>, AppError> {
    let page = state
        .category_service
        .list(&params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/v1/categories/distribution
pub async fn distribution(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<CategoryWithCount>>>, AppError> {
    let counts = state.category_service.distribution().await?;
    Ok(Json(ApiResponse::ok(counts)))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let id: CategoryId = parse_id(&id)?;
    let category = state.category_service.get(id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), AppError> {
    require_admin(&state, &auth)?;
    validate_body(&req)?;

    let category = state
        .category_service
        .create(CreateCategory {
            name: req.name,
            description: req.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    require_admin(&state, &auth)?;
    let id: CategoryId = parse_id(&id)?;
    validate_body(&req)?;

    let category = state
        .category_service
        .update(
            id,
            UpdateCategory {
                name: req.name,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    require_admin(&state, &auth)?;
    let id: CategoryId = parse_id(&id)?;

    state.category_service.delete(id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Category deleted successfully",
    ))))
}

/// GET /api/v1/categories/{id}/products
pub async fn list_category_products(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Product>>>, AppError> {
    let id: CategoryId = parse_id(&id)?;
    let page = state
        .category_service
        .products(id, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/v1/categories/{id}/products/{product_id}
pub async fn add_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, product_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    require_admin(&state, &auth)?;
    let id: CategoryId = parse_id(&id)?;
    let product_id: ProductId = parse_id(&product_id)?;

    state.category_service.add_product(id, product_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Product added to category",
    ))))
}

/// DELETE /api/v1/categories/{id}/products/{product_id}
pub async fn remove_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, product_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    require_admin(&state, &auth)?;
    let id: CategoryId = parse_id(&id)?;
    let product_id: ProductId = parse_id(&product_id)?;

    state
        .category_service
        .remove_product(id, product_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Product removed from category",
    ))))
}
