//! Database operations for home page slider items.

use sqlx::PgPool;

use tamarind_core::SliderItemId;

use super::RepositoryError;
use crate::models::{CreateSliderItemInput, SliderItem, UpdateSliderItemInput};

const SLIDER_COLUMNS: &str = "id, title, subtitle, image_url, link_url, sort_order, \
     is_active, created_at, updated_at";

/// Repository for slider item database operations.
pub struct SliderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SliderRepository<'a> {
    /// Create a new slider repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List slider items in carousel order, optionally only active ones.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, active_only: bool) -> Result<Vec<SliderItem>, RepositoryError> {
        let sql = format!(
            "SELECT {SLIDER_COLUMNS} FROM slider_items \
             WHERE (NOT $1 OR is_active) ORDER BY sort_order ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, SliderItem>(&sql)
            .bind(active_only)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Get a slider item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: SliderItemId) -> Result<Option<SliderItem>, RepositoryError> {
        let sql = format!("SELECT {SLIDER_COLUMNS} FROM slider_items WHERE id = $1");
        let row = sqlx::query_as::<_, SliderItem>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Create a new slider item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        input: &CreateSliderItemInput,
    ) -> Result<SliderItem, RepositoryError> {
        let sql = format!(
            "INSERT INTO slider_items (title, subtitle, image_url, link_url, sort_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {SLIDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SliderItem>(&sql)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(self.pool)
            .await?;

        Ok(row)
    }

    /// Update a slider item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: SliderItemId,
        input: &UpdateSliderItemInput,
    ) -> Result<SliderItem, RepositoryError> {
        let sql = format!(
            "UPDATE slider_items SET \
                 title = COALESCE($2, title), \
                 subtitle = COALESCE($3, subtitle), \
                 image_url = COALESCE($4, image_url), \
                 link_url = COALESCE($5, link_url), \
                 sort_order = COALESCE($6, sort_order), \
                 is_active = COALESCE($7, is_active), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {SLIDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SliderItem>(&sql)
            .bind(id)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row)
    }

    /// Delete a slider item.
    ///
    /// # Returns
    ///
    /// Returns `true` if the item was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: SliderItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM slider_items WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
