//! Category entity model.

use catalog_core::types::CategoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product category. Products and categories are linked many-to-many.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category row joined with the number of attached products.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CategoryWithCount {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub product_count: i64,
}

/// Data required to create a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: String,
}

/// Partial category update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
}
