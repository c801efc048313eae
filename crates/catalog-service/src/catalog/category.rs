//! Category management and product membership.

use tracing::info;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_core::types::{CategoryId, ProductId};
use catalog_database::repositories::{CategoryRepository, ProductRepository};
use catalog_entity::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};
use catalog_entity::product::Product;

/// Handles categories and the products filed under them.
#[derive(Debug, Clone)]
pub struct CategoryService {
    categories: CategoryRepository,
    products: ProductRepository,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: CategoryRepository, products: ProductRepository) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Lists categories by name.
    pub async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Category>> {
        self.categories.find_all(page).await
    }

    /// Product counts per category.
    pub async fn distribution(&self) -> AppResult<Vec<CategoryWithCount>> {
        self.categories.distribution().await
    }

    /// Loads one category.
    pub async fn get(&self, id: CategoryId) -> AppResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("category not found"))
    }

    /// Creates a category.
    pub async fn create(&self, input: CreateCategory) -> AppResult<Category> {
        let input = CreateCategory {
            name: input.name.trim().to_string(),
            description: input.description,
        };
        if input.name.is_empty() {
            return Err(AppError::validation("category name cannot be empty"));
        }
        let category = self.categories.create(&input).await?;
        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Applies a partial update.
    pub async fn update(&self, id: CategoryId, patch: UpdateCategory) -> AppResult<Category> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("category name cannot be empty"));
        }
        self.categories
            .update(id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found("category not found"))
    }

    /// Deletes a category. Products stay, only their links go.
    pub async fn delete(&self, id: CategoryId) -> AppResult<()> {
        if !self.categories.delete(id).await? {
            return Err(AppError::not_found("category not found"));
        }
        info!(category_id = %id, "Category deleted");
        Ok(())
    }

    /// Products filed under a category.
    pub async fn products(
        &self,
        id: CategoryId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Product>> {
        self.get(id).await?;
        self.categories.products_in(id, page).await
    }

    /// Files a product under a category.
    pub async fn add_product(&self, id: CategoryId, product_id: ProductId) -> AppResult<()> {
        self.get(id).await?;
        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(AppError::not_found("product not found"));
        }
        self.categories.attach_product(id, product_id).await?;
        info!(category_id = %id, product_id = %product_id, "Product added to category");
        Ok(())
    }

    /// Removes a product from a category.
    pub async fn remove_product(&self, id: CategoryId, product_id: ProductId) -> AppResult<()> {
        if !self.categories.detach_product(id, product_id).await? {
            return Err(AppError::not_found("product is not in this category"));
        }
        info!(category_id = %id, product_id = %product_id, "Product removed from category");
        Ok(())
    }
}
