//! Product repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::traits::Repository;
use catalog_core::types::pagination::{PageRequest, PageResponse};
use catalog_core::types::{CategoryId, ProductId};
use catalog_entity::category::Category;
use catalog_entity::product::{CreateProduct, Product, ProductFilter, UpdateProduct};

const FILTER_CLAUSE: &str = "\
    ($1::text IS NULL OR p.name ILIKE $1 OR p.description ILIKE $1) \
    AND (cardinality($2::product_status[]) = 0 OR p.status = ANY($2)) \
    AND ($3::bigint IS NULL OR EXISTS (\
        SELECT 1 FROM product_categories pc \
        WHERE pc.product_id = p.id AND pc.category_id = $3)) \
    AND ($4::float8 IS NULL OR p.price >= $4) \
    AND ($5::float8 IS NULL OR p.price <= $5)";

/// Repository for products and their category links.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List products matching the filter, newest first.
    pub async fn search(
        &self,
        filter: &ProductFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Product>> {
        let pattern = filter.search.as_deref().map(|q| format!("%{q}%"));

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM products p WHERE {FILTER_CLAUSE}"))
                .bind(&pattern)
                .bind(&filter.statuses)
                .bind(filter.category_id)
                .bind(filter.min_price)
                .bind(filter.max_price)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count products", e)
                })?;

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT p.* FROM products p WHERE {FILTER_CLAUSE} \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $6 OFFSET $7"
        ))
        .bind(&pattern)
        .bind(&filter.statuses)
        .bind(filter.category_id)
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list products", e))?;

        Ok(PageResponse::new(products, page, total as u64))
    }

    /// Categories attached to a product.
    pub async fn categories_of(&self, id: ProductId) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT c.* FROM categories c \
             JOIN product_categories pc ON pc.category_id = c.id \
             WHERE pc.product_id = $1 ORDER BY c.name",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load product categories", e)
        })
    }

    async fn link_categories(
        tx: &mut Transaction<'_, Postgres>,
        id: ProductId,
        category_ids: &[CategoryId],
    ) -> AppResult<()> {
        if category_ids.is_empty() {
            return Ok(());
        }
        let raw: Vec<i64> = category_ids.iter().map(|c| c.get() as i64).collect();
        sqlx::query(
            "INSERT INTO product_categories (product_id, category_id) \
             SELECT $1, UNNEST($2::bigint[]) ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(&raw)
        .execute(&mut **tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::validation("One or more categories do not exist")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to link categories", e),
        })?;
        Ok(())
    }
}

#[async_trait]
impl Repository for ProductRepository {
    type Entity = Product;
    type Id = ProductId;
    type Create = CreateProduct;
    type Update = UpdateProduct;

    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find product", e))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Product>> {
        self.search(&ProductFilter::default(), page).await
    }

    async fn create(&self, input: &CreateProduct) -> AppResult<Product> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, description, price, stock_quantity, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.stock_quantity)
        .bind(input.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create product", e))?;

        Self::link_categories(&mut tx, product.id, &input.category_ids).await?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit product", e)
        })?;
        Ok(product)
    }

    async fn update(&self, id: ProductId, patch: &UpdateProduct) -> AppResult<Option<Product>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET name = COALESCE($2, name), \
                                 description = COALESCE($3, description), \
                                 price = COALESCE($4, price), \
                                 stock_quantity = COALESCE($5, stock_quantity), \
                                 status = COALESCE($6, status), \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(patch.price)
        .bind(patch.stock_quantity)
        .bind(patch.status)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update product", e))?;

        let Some(product) = product else {
            return Ok(None);
        };

        if let Some(category_ids) = &patch.category_ids {
            sqlx::query("DELETE FROM product_categories WHERE product_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to unlink categories", e)
                })?;
            Self::link_categories(&mut tx, id, category_ids).await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit product", e)
        })?;
        Ok(Some(product))
    }

    async fn delete(&self, id: ProductId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete product", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
