//! Wishlist repository implementation.

use sqlx::PgPool;

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_core::types::{ProductId, UserId};
use catalog_entity::wishlist::WishlistEntry;

/// Repository for users' saved products.
#[derive(Debug, Clone)]
pub struct WishlistRepository {
    pool: PgPool,
}

impl WishlistRepository {
    /// Create a new wishlist repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A user's saved products, most recently added first.
    pub async fn find_by_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<WishlistEntry>> {
        let total = self.count_by_user(user_id).await?;

        let entries = sqlx::query_as::<_, WishlistEntry>(
            "SELECT p.*, w.added_at FROM wishlists w \
             JOIN products p ON p.id = w.product_id \
             WHERE w.user_id = $1 \
             ORDER BY w.added_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list wishlist", e))?;

        Ok(PageResponse::new(entries, page, total))
    }

    /// Save a product. Returns `false` if it was already saved.
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO wishlists (user_id, product_id) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT pk_wishlists DO NOTHING",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found("product not found")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to add wishlist entry", e),
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a saved product. Returns `true` if it was saved.
    pub async fn remove(&self, user_id: UserId, product_id: ProductId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove wishlist entry", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of saved products across all users.
    pub async fn count_all(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wishlists")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count wishlists", e))?;
        Ok(total as u64)
    }

    /// Number of products one user has saved.
    pub async fn count_by_user(&self, user_id: UserId) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wishlists WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count user wishlist", e)
            })?;
        Ok(total as u64)
    }
}
