//! Wishlist entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::product::Product;

/// A product saved to a user's wishlist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WishlistEntry {
    /// The saved product, as currently stored.
    #[sqlx(flatten)]
    pub product: Product,
    /// When the product was saved.
    pub added_at: DateTime<Utc>,
}
