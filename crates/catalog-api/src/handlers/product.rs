//! Product handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use catalog_core::error::AppError;
use catalog_core::types::ProductId;
use catalog_core::types::pagination::PageResponse;
use catalog_entity::product::{CreateProduct, Product, ProductStatus, UpdateProduct};
use catalog_service::ProductDetails;

use crate::dto::request::{CreateProductRequest, ProductQuery, UpdateProductRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_body;
use crate::extractors::{AuthUser, parse_id};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/v1/products
pub async fn list_products(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ApiResponse<PageResponse<Product>>>, AppError> {
    let filter = query.filter()?;
    let page = state
        .product_service
        .list(&filter, &query.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductDetails>>, AppError> {
    let id: ProductId = parse_id(&id)?;
    let product = state.product_service.get(id).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductDetails>>), AppError> {
    require_admin(&state, &auth)?;
    validate_body(&req)?;

    let status = match req.status.as_deref() {
        Some(s) => s.parse()?,
        None => ProductStatus::default(),
    };

    let product = state
        .product_service
        .create(CreateProduct {
            name: req.name,
            description: req.description,
            price: req.price,
            stock_quantity: req.stock_quantity,
            status,
            category_ids: req.category_ids,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(product))))
}

/// PUT /api/v1/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<ProductDetails>>, AppError> {
    require_admin(&state, &auth)?;
    let id: ProductId = parse_id(&id)?;
    validate_body(&req)?;

    let patch = UpdateProduct {
        name: req.name,
        description: req.description,
        price: req.price,
        stock_quantity: req.stock_quantity,
        status: req.status.as_deref().map(str::parse).transpose()?,
        category_ids: req.category_ids,
    };
    let product = state.product_service.update(id, patch).await?;

    Ok(Json(ApiResponse::ok(product)))
}

/// DELETE /api/v1/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    require_admin(&state, &auth)?;
    let id: ProductId = parse_id(&id)?;

    state.product_service.delete(id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Product deleted successfully",
    ))))
}
