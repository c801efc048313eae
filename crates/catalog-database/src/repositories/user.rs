//! User repository implementation.

use sqlx::PgPool;

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::types::UserId;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_entity::user::{CreateUser, UpdateUser, User, UserRole};

/// Admin listing filter for users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive match on username, email or full name.
    pub search: Option<String>,
    /// Restrict to a single role.
    pub role: Option<UserRole>,
}

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// List users matching the filter, newest first.
    pub async fn find_all(
        &self,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let pattern = filter.search.as_deref().map(|q| format!("%{q}%"));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users \
             WHERE ($1::user_role IS NULL OR role = $1) \
               AND ($2::text IS NULL OR username ILIKE $2 OR email ILIKE $2 OR full_name ILIKE $2)",
        )
        .bind(filter.role)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users \
             WHERE ($1::user_role IS NULL OR role = $1) \
               AND ($2::text IS NULL OR username ILIKE $2 OR email ILIKE $2 OR full_name ILIKE $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(filter.role)
        .bind(&pattern)
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(users, page, total as u64))
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, full_name, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.full_name)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Failed to create user"))
    }

    /// Update a user's own profile fields. `None` fields are kept.
    pub async fn update_profile(&self, id: UserId, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET username = COALESCE($2, username), \
                              email = COALESCE($3, email), \
                              full_name = COALESCE($4, full_name), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.full_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Failed to update user"))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Update a user's password hash.
    pub async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        Ok(())
    }

    /// Update a user's role.
    pub async fn update_role(&self, id: UserId, role: UserRole) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Stamp the last successful login.
    pub async fn update_last_login(&self, id: UserId) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;
        Ok(())
    }

    /// Delete a user unless it holds the admin role. Returns `true` if a
    /// row was removed.
    pub async fn delete_non_admin(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role <> 'admin'")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_unique_violation(err: sqlx::Error, context: &'static str) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_username_key") => {
            AppError::conflict("Username already taken")
        }
        sqlx::Error::Database(ref db_err)
            if matches!(
                db_err.constraint(),
                Some("users_email_key") | Some("idx_users_email_lower")
            ) =>
        {
            AppError::conflict("Email already in use")
        }
        _ => AppError::with_source(ErrorKind::Database, context, err),
    }
}
