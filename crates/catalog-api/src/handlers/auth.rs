//! Auth handlers: register, login, refresh.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use catalog_core::error::AppError;
use catalog_service::RegisterInput;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, TokenResponse, UserResponse};
use crate::dto::validate_body;
use crate::state::AppState;

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    validate_body(&req)?;
    let role = req.parsed_role()?;

    let user = state
        .auth_service
        .register(RegisterInput {
            username: req.username,
            email: req.email,
            full_name: req.full_name,
            password: req.password,
            confirm_password: req.confirm_password,
            role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(user))),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    validate_body(&req)?;

    let outcome = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(TokenResponse::new(
        outcome.tokens,
        Some(UserResponse::from(outcome.user)),
    ))))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    validate_body(&req)?;

    let tokens = state.auth_service.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(TokenResponse::new(tokens, None))))
}
