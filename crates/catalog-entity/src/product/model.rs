//! Product entity model.

use catalog_core::types::{CategoryId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::ProductStatus;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub stock_quantity: i32,
    /// Publication status.
    pub status: ProductStatus,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub stock_quantity: i32,
    /// Initial status.
    pub status: ProductStatus,
    /// Categories to attach on creation.
    pub category_ids: Vec<CategoryId>,
}

/// Partial product update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i32>,
    pub status: Option<ProductStatus>,
    /// Replaces the category set when present.
    pub category_ids: Option<Vec<CategoryId>>,
}

/// Product listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,
    /// Restrict to these statuses.
    pub statuses: Vec<ProductStatus>,
    /// Restrict to products in this category.
    pub category_id: Option<CategoryId>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}
