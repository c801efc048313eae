//! Category repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_core::types::{CategoryId, ProductId};
use catalog_entity::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};
use catalog_entity::product::Product;

/// Repository for categories and the product-category link table.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every category with its product count, largest first.
    pub async fn distribution(&self) -> AppResult<Vec<CategoryWithCount>> {
        sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.description, COUNT(pc.product_id) AS product_count \
             FROM categories c \
             LEFT JOIN product_categories pc ON pc.category_id = c.id \
             GROUP BY c.id ORDER BY product_count DESC, c.name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load category distribution", e)
        })
    }

    /// Products attached to a category.
    pub async fn products_in(
        &self,
        id: CategoryId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Product>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM product_categories WHERE category_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count category products", e)
                })?;

        let products = sqlx::query_as::<_, Product>(
            "SELECT p.* FROM products p \
             JOIN product_categories pc ON pc.product_id = p.id \
             WHERE pc.category_id = $1 \
             ORDER BY p.created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(id)
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list category products", e)
        })?;

        Ok(PageResponse::new(products, page, total as u64))
    }

    /// Link a product to a category. Linking twice is a no-op.
    pub async fn attach_product(&self, id: CategoryId, product_id: ProductId) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO product_categories (product_id, category_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(product_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found("Category or product not found")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to attach product", e),
        })?;
        Ok(())
    }

    /// Unlink a product from a category. Returns `true` if a link was removed.
    pub async fn detach_product(&self, id: CategoryId, product_id: ProductId) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM product_categories WHERE product_id = $1 AND category_id = $2",
        )
        .bind(product_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to detach product", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Repository for CategoryRepository {
    type Entity = Category;
    type Id = CategoryId;
    type Create = CreateCategory;
    type Update = UpdateCategory;

    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Category>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count categories", e)
            })?;

        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))?;

        Ok(PageResponse::new(categories, page, total as u64))
    }

    async fn create(&self, input: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("Category '{}' already exists", input.name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create category", e),
        })
    }

    async fn update(&self, id: CategoryId, patch: &UpdateCategory) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = COALESCE($2, name), \
                                   description = COALESCE($3, description), \
                                   updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict("A category with that name already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update category", e),
        })
    }

    async fn delete(&self, id: CategoryId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete category", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
