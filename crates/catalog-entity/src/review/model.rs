//! Review entity model.

use catalog_core::types::{ProductId, ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lowest accepted rating.
pub const MIN_RATING: i16 = 1;
/// Highest accepted rating.
pub const MAX_RATING: i16 = 5;

/// A user's rating of a product.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    /// Unique review identifier.
    pub id: ReviewId,
    /// Reviewed product.
    pub product_id: ProductId,
    /// Author.
    pub user_id: UserId,
    /// Rating from 1 to 5.
    pub rating: i16,
    /// Review text.
    pub comment: String,
    /// When the review was posted.
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Whether the given user wrote this review.
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Data required to post a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReview {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: i16,
    pub comment: String,
}
