//! Database operations for categories.

use sqlx::PgPool;

use tamarind_core::CategoryId;

use super::RepositoryError;
use crate::models::{Category, CreateCategoryInput, UpdateCategoryInput};

const CATEGORY_COLUMNS: &str = "id, name, slug, description, image_url, banner_url, \
     is_active, created_at, updated_at";

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List categories, optionally restricted to active ones, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, active_only: bool) -> Result<Vec<Category>, RepositoryError> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE (NOT $1 OR is_active) ORDER BY name ASC"
        );
        let rows = sqlx::query_as::<_, Category>(&sql)
            .bind(active_only)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");
        let row = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Get a category by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, RepositoryError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE slug = $1");
        let row = sqlx::query_as::<_, Category>(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Create a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &CreateCategoryInput) -> Result<Category, RepositoryError> {
        let sql = format!(
            "INSERT INTO categories (name, slug, description, image_url, banner_url, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Category>(&sql)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.banner_url)
            .bind(input.is_active)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("categories_slug_key")
                {
                    return RepositoryError::Conflict(format!(
                        "a category with slug '{}' already exists",
                        input.slug
                    ));
                }
                RepositoryError::Database(e)
            })?;

        Ok(row)
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new slug is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CategoryId,
        input: &UpdateCategoryInput,
    ) -> Result<Category, RepositoryError> {
        let sql = format!(
            "UPDATE categories SET \
                 name = COALESCE($2, name), \
                 slug = COALESCE($3, slug), \
                 description = COALESCE($4, description), \
                 image_url = COALESCE($5, image_url), \
                 banner_url = COALESCE($6, banner_url), \
                 is_active = COALESCE($7, is_active), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {CATEGORY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.banner_url)
            .bind(input.is_active)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("categories_slug_key")
                {
                    return RepositoryError::Conflict("slug already in use".to_string());
                }
                RepositoryError::Database(e)
            })?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row)
    }

    /// Count products referencing a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product_count(&self, id: CategoryId) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// Delete a category.
    ///
    /// A category that still has products cannot be deleted; the products
    /// must be moved or removed first.
    ///
    /// # Returns
    ///
    /// Returns `true` if the category was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if products still reference it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        if self.product_count(id).await? > 0 {
            return Err(RepositoryError::Conflict(
                "category still has products".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                // FK RESTRICT backstop for products created between the
                // count check and the delete.
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("products_category_id_fkey")
                {
                    return RepositoryError::Conflict(
                        "category still has products".to_string(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
