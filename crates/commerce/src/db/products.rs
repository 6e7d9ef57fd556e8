//! Database operations for products.

use sqlx::PgPool;

use tamarind_core::ProductId;

use super::RepositoryError;
use crate::models::list::page_bounds;
use crate::models::{CreateProductInput, Product, ProductFilter, UpdateProductInput};

const PRODUCT_COLUMNS: &str = "id, name, slug, description, price, sale_price, sku, \
     stock_quantity, category_id, images, is_active, is_featured, created_at, updated_at";

const PRODUCT_FILTER_WHERE: &str = "($1::int IS NULL OR category_id = $1) \
     AND ($2::bool IS NULL OR is_active = $2) \
     AND ($3::bool IS NULL OR is_featured = $3) \
     AND ($4::text IS NULL OR name ILIKE '%' || $4 || '%' OR sku ILIKE '%' || $4 || '%')";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products with filtering, sorting and pagination.
    ///
    /// Returns the matching page plus the total row count for the filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &ProductFilter,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let (_, limit, offset) = page_bounds(filter.page, filter.limit);
        let category_id = filter.category_id.map(|id| id.as_i32());

        // Sort column and direction come from closed enums, never from the
        // request string itself.
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE {PRODUCT_FILTER_WHERE} \
             ORDER BY {} {} LIMIT $5 OFFSET $6",
            filter.sort_by.as_column(),
            filter.sort_order.as_sql(),
        );
        let rows = sqlx::query_as::<_, Product>(&sql)
            .bind(category_id)
            .bind(filter.is_active)
            .bind(filter.is_featured)
            .bind(&filter.search)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM products WHERE {PRODUCT_FILTER_WHERE}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(category_id)
            .bind(filter.is_active)
            .bind(filter.is_featured)
            .bind(&filter.search)
            .fetch_one(self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Get a product by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug or SKU is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &CreateProductInput) -> Result<Product, RepositoryError> {
        let sql = format!(
            "INSERT INTO products (name, slug, description, price, sale_price, sku, \
                 stock_quantity, category_id, images, is_active, is_featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.sale_price)
            .bind(&input.sku)
            .bind(input.stock_quantity)
            .bind(input.category_id)
            .bind(&input.images)
            .bind(input.is_active)
            .bind(input.is_featured)
            .fetch_one(self.pool)
            .await
            .map_err(map_product_conflict)?;

        Ok(row)
    }

    /// Update a product.
    ///
    /// `sale_price`, `description`, `category_id` and `images` follow the
    /// COALESCE convention: an absent field keeps the stored value, so none
    /// of them can be cleared back to NULL through this method.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slug or SKU is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        input: &UpdateProductInput,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            "UPDATE products SET \
                 name = COALESCE($2, name), \
                 slug = COALESCE($3, slug), \
                 description = COALESCE($4, description), \
                 price = COALESCE($5, price), \
                 sale_price = COALESCE($6, sale_price), \
                 sku = COALESCE($7, sku), \
                 stock_quantity = COALESCE($8, stock_quantity), \
                 category_id = COALESCE($9, category_id), \
                 images = COALESCE($10, images), \
                 is_active = COALESCE($11, is_active), \
                 is_featured = COALESCE($12, is_featured), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.sale_price)
            .bind(&input.sku)
            .bind(input.stock_quantity)
            .bind(input.category_id)
            .bind(&input.images)
            .bind(input.is_active)
            .bind(input.is_featured)
            .fetch_optional(self.pool)
            .await
            .map_err(map_product_conflict)?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row)
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if order items reference it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("order_items_product_id_fkey")
                {
                    return RepositoryError::Conflict(
                        "product is referenced by existing orders".to_string(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Decrement a product's stock by the ordered quantity.
    ///
    /// The `stock_quantity >= 0` CHECK constraint makes an oversell fail the
    /// statement rather than store a negative count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn decrement_stock(
        &self,
        id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET stock_quantity = stock_quantity - $2, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Map slug/SKU unique violations to `Conflict`.
fn map_product_conflict(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        match db_err.constraint() {
            Some("products_slug_key") => {
                return RepositoryError::Conflict("slug already in use".to_string());
            }
            Some("products_sku_key") => {
                return RepositoryError::Conflict("sku already in use".to_string());
            }
            _ => {}
        }
    }
    RepositoryError::Database(e)
}
