//! User self-service operations: profile and password changes.

use tracing::info;

use catalog_auth::IdentityContext;
use catalog_auth::password::{PasswordHasher, PasswordValidator};
use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::types::UserId;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_database::repositories::{UserFilter, UserRepository};
use catalog_entity::user::{UpdateUser, User};

/// A password change submitted by the account owner.
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Handles profile reads and self-service updates.
#[derive(Debug, Clone)]
pub struct UserService {
    users: UserRepository,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: UserRepository, hasher: PasswordHasher, validator: PasswordValidator) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// The caller's own account.
    pub async fn profile(&self, ctx: &IdentityContext) -> AppResult<User> {
        self.get(ctx.subject_id).await
    }

    /// Any account by ID.
    pub async fn get(&self, id: UserId) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user not found"))
    }

    /// Lists accounts.
    pub async fn list(
        &self,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.users.find_all(filter, page).await
    }

    /// Updates the caller's username, email, or full name.
    pub async fn update_profile(&self, ctx: &IdentityContext, patch: UpdateUser) -> AppResult<User> {
        let patch = UpdateUser {
            username: trimmed(patch.username),
            email: trimmed(patch.email),
            full_name: trimmed(patch.full_name),
        };
        if patch.is_empty() {
            return self.profile(ctx).await;
        }

        if let Some(username) = &patch.username {
            if let Some(existing) = self.users.find_by_username(username).await? {
                if existing.id != ctx.subject_id {
                    return Err(AppError::conflict("username already exists"));
                }
            }
        }
        if let Some(email) = &patch.email {
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != ctx.subject_id {
                    return Err(AppError::conflict("email already exists"));
                }
            }
        }

        let user = self.users.update_profile(ctx.subject_id, &patch).await?;
        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Replaces the caller's password after checking the current one.
    pub async fn change_password(&self, ctx: &IdentityContext, change: PasswordChange) -> AppResult<()> {
        self.validator
            .validate_confirmation(&change.new_password, &change.confirm_new_password)?;
        self.validator.validate(&change.new_password)?;
        self.validator
            .validate_not_same(&change.current_password, &change.new_password)?;

        let user = self.profile(ctx).await?;
        if !self
            .hasher
            .verify_password(&change.current_password, &user.password_hash)?
        {
            return Err(AppError::validation("current password is incorrect"));
        }

        let hash = self.hasher.hash_password(&change.new_password)?;
        self.users.update_password(user.id, &hash).await?;
        info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
