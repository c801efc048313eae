//! User self-service and user management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use catalog_core::error::AppError;
use catalog_core::types::UserId;
use catalog_core::types::pagination::PageResponse;
use catalog_database::repositories::UserFilter;
use catalog_entity::user::{UpdateUser, UserRole};
use catalog_service::PasswordChange;

use crate::dto::request::{
    ChangePasswordRequest, ChangeRoleRequest, UpdateProfileRequest, UserListQuery,
};
use crate::dto::response::{ApiResponse, MessageResponse, RoleChangeResponse, UserResponse};
use crate::dto::validate_body;
use crate::extractors::{AuthUser, parse_id};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/v1/auth/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/v1/auth/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    validate_body(&req)?;

    let user = state
        .user_service
        .update_profile(
            &auth,
            UpdateUser {
                username: req.username,
                email: req.email,
                full_name: req.full_name,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/v1/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    validate_body(&req)?;

    state
        .user_service
        .change_password(
            &auth,
            PasswordChange {
                current_password: req.current_password,
                new_password: req.new_password,
                confirm_new_password: req.confirm_new_password,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed successfully",
    ))))
}

/// GET /api/v1/auth/users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<UserListQuery>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, AppError> {
    let filter = UserFilter {
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
        role: query.role.as_deref().map(str::parse).transpose()?,
    };
    let page = state
        .user_service
        .list(&filter, &query.page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page.map(UserResponse::from))))
}

/// GET /api/v1/auth/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let id: UserId = parse_id(&id)?;
    let user = state.user_service.get(id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/v1/auth/users/{id}/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<RoleChangeResponse>>, AppError> {
    require_admin(&state, &auth)?;
    let id: UserId = parse_id(&id)?;
    let role: UserRole = req.role.parse()?;

    let updated = state
        .admin_user_service
        .change_role(&auth, id, role)
        .await?;

    Ok(Json(ApiResponse::ok(updated.into())))
}

/// DELETE /api/v1/auth/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    require_admin(&state, &auth)?;
    let id: UserId = parse_id(&id)?;

    state.admin_user_service.delete_user(&auth, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User deleted successfully",
    ))))
}
