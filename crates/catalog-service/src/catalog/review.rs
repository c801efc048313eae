//! Product reviews.

use serde::Serialize;
use tracing::info;

use catalog_auth::IdentityContext;
use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_core::types::{ProductId, ReviewId};
use catalog_database::repositories::{ProductRepository, ReviewRepository};
use catalog_entity::review::model::{MAX_RATING, MIN_RATING};
use catalog_entity::review::{CreateReview, Review};

/// Longest accepted review comment, in characters.
const MAX_COMMENT_CHARS: usize = 500;

/// Review totals for the caller and for everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewCounts {
    pub total_reviews: u64,
    pub my_review_count: u64,
}

/// Handles posting, listing, and removing reviews.
#[derive(Debug, Clone)]
pub struct ReviewService {
    reviews: ReviewRepository,
    products: ProductRepository,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(reviews: ReviewRepository, products: ProductRepository) -> Self {
        Self { reviews, products }
    }

    /// Reviews of a product, newest first.
    pub async fn list(
        &self,
        product_id: ProductId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Review>> {
        self.ensure_product(product_id).await?;
        self.reviews.find_by_product(product_id, page).await
    }

    /// Loads one review.
    pub async fn get(&self, id: ReviewId) -> AppResult<Review> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("review not found"))
    }

    /// Review totals.
    pub async fn counts(&self, ctx: &IdentityContext) -> AppResult<ReviewCounts> {
        Ok(ReviewCounts {
            total_reviews: self.reviews.count_all().await?,
            my_review_count: self.reviews.count_by_user(ctx.subject_id).await?,
        })
    }

    /// Posts a review as the caller. A user reviews each product at most
    /// once; a second attempt is a conflict.
    pub async fn create(
        &self,
        ctx: &IdentityContext,
        product_id: ProductId,
        rating: i16,
        comment: String,
    ) -> AppResult<Review> {
        validate_review(rating, &comment)?;
        self.ensure_product(product_id).await?;

        let review = self
            .reviews
            .create(&CreateReview {
                product_id,
                user_id: ctx.subject_id,
                rating,
                comment: comment.trim().to_string(),
            })
            .await?;
        info!(review_id = %review.id, product_id = %product_id, "Review posted");
        Ok(review)
    }

    /// Deletes a review. Only its author or an admin may do so.
    pub async fn delete(&self, ctx: &IdentityContext, id: ReviewId) -> AppResult<()> {
        let review = self.get(id).await?;
        if !review.is_authored_by(ctx.subject_id) && !ctx.is_admin() {
            return Err(AppError::authorization("you can only delete your own reviews"));
        }
        self.reviews.delete(id).await?;
        info!(review_id = %id, actor_id = %ctx.subject_id, "Review deleted");
        Ok(())
    }

    async fn ensure_product(&self, id: ProductId) -> AppResult<()> {
        match self.products.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("product not found")),
        }
    }
}

fn validate_review(rating: i16, comment: &str) -> AppResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    let len = comment.trim().chars().count();
    if len == 0 || len > MAX_COMMENT_CHARS {
        return Err(AppError::validation(format!(
            "comment must be between 1 and {MAX_COMMENT_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_review(1, "ok").is_ok());
        assert!(validate_review(5, "great").is_ok());
        assert!(validate_review(0, "bad").is_err());
        assert!(validate_review(6, "too good").is_err());
    }

    #[test]
    fn test_comment_length() {
        assert!(validate_review(3, "   ").is_err());
        assert!(validate_review(3, &"x".repeat(501)).is_err());
        assert!(validate_review(3, &"x".repeat(500)).is_ok());
    }
}
