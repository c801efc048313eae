//! Review repository implementation.

use sqlx::PgPool;

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_core::types::{ProductId, ReviewId, UserId};
use catalog_entity::review::{CreateReview, Review};

/// Repository for product reviews.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a review by primary key.
    pub async fn find_by_id(&self, id: ReviewId) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find review", e))
    }

    /// Reviews for one product, newest first.
    pub async fn find_by_product(
        &self,
        product_id: ProductId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Review>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count reviews", e))?;

        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE product_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(product_id)
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reviews", e))?;

        Ok(PageResponse::new(reviews, page, total as u64))
    }

    /// Insert a review.
    pub async fn create(&self, data: &CreateReview) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (product_id, user_id, rating, comment) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.product_id)
        .bind(data.user_id)
        .bind(data.rating)
        .bind(&data.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_create_error(e, data.product_id))
    }

    /// Number of reviews across all products.
    pub async fn count_all(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count reviews", e))?;
        Ok(total as u64)
    }

    /// Number of reviews written by one user.
    pub async fn count_by_user(&self, user_id: UserId) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count user reviews", e)
            })?;
        Ok(total as u64)
    }

    /// Delete a review. Returns `true` if a row was removed.
    pub async fn delete(&self, id: ReviewId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete review", e))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Message for a second review of the same product by the same user.
pub const DUPLICATE_REVIEW_MESSAGE: &str = "you have already reviewed this product";

fn map_create_error(err: sqlx::Error, product_id: ProductId) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("uq_reviews_product_user") => {
            AppError::conflict(DUPLICATE_REVIEW_MESSAGE)
        }
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::not_found(format!("Product {product_id} not found"))
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to create review", err),
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind as SqlErrorKind};

    use super::*;

    #[derive(Debug)]
    struct PgViolation {
        unique: bool,
        constraint: &'static str,
    }

    impl fmt::Display for PgViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "violates constraint {}", self.constraint)
        }
    }

    impl StdError for PgViolation {}

    impl DatabaseError for PgViolation {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            None
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> SqlErrorKind {
            if self.unique {
                SqlErrorKind::UniqueViolation
            } else {
                SqlErrorKind::ForeignKeyViolation
            }
        }
    }

    fn violation(unique: bool, constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgViolation { unique, constraint }))
    }

    #[test]
    fn test_second_review_is_conflict() {
        let err = map_create_error(
            violation(true, "uq_reviews_product_user"),
            ProductId::new(3),
        );
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(err.message, DUPLICATE_REVIEW_MESSAGE);
    }

    #[test]
    fn test_vanished_product_is_not_found() {
        let err = map_create_error(
            violation(false, "reviews_product_id_fkey"),
            ProductId::new(3),
        );
        assert!(err.is(ErrorKind::NotFound));
    }

    #[test]
    fn test_other_failures_are_database_errors() {
        let err = map_create_error(sqlx::Error::PoolTimedOut, ProductId::new(3));
        assert!(err.is(ErrorKind::Database));
    }
}
