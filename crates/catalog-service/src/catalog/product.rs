//! Product management.

use serde::Serialize;
use tracing::info;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_core::types::ProductId;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_database::repositories::ProductRepository;
use catalog_entity::category::Category;
use catalog_entity::product::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// A product together with its categories.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub categories: Vec<Category>,
}

/// Handles product CRUD and search.
#[derive(Debug, Clone)]
pub struct ProductService {
    products: ProductRepository,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(products: ProductRepository) -> Self {
        Self { products }
    }

    /// Searches products.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Product>> {
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                return Err(AppError::validation("min_price must not exceed max_price"));
            }
        }
        self.products.search(filter, page).await
    }

    /// Loads one product with its categories.
    pub async fn get(&self, id: ProductId) -> AppResult<ProductDetails> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("product not found"))?;
        let categories = self.products.categories_of(id).await?;
        Ok(ProductDetails {
            product,
            categories,
        })
    }

    /// Creates a product.
    pub async fn create(&self, input: CreateProduct) -> AppResult<ProductDetails> {
        validate_fields(Some(&input.name), Some(input.price), Some(input.stock_quantity))?;
        let product = self.products.create(&input).await?;
        info!(product_id = %product.id, name = %product.name, "Product created");
        self.get(product.id).await
    }

    /// Applies a partial update.
    pub async fn update(&self, id: ProductId, patch: UpdateProduct) -> AppResult<ProductDetails> {
        validate_fields(patch.name.as_deref(), patch.price, patch.stock_quantity)?;
        self.products
            .update(id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found("product not found"))?;
        info!(product_id = %id, "Product updated");
        self.get(id).await
    }

    /// Deletes a product and its category links and reviews.
    pub async fn delete(&self, id: ProductId) -> AppResult<()> {
        if !self.products.delete(id).await? {
            return Err(AppError::not_found("product not found"));
        }
        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

fn validate_fields(name: Option<&str>, price: Option<f64>, stock: Option<i32>) -> AppResult<()> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::validation("product name cannot be empty"));
    }
    if price.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(AppError::validation("price must be a non-negative number"));
    }
    if stock.is_some_and(|s| s < 0) {
        return Err(AppError::validation("stock quantity cannot be negative"));
    }
    Ok(())
}
