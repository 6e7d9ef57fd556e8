//! Database operations for delivery districts.

use sqlx::PgPool;

use tamarind_core::DistrictId;

use super::RepositoryError;
use crate::models::{CreateDistrictInput, District, UpdateDistrictInput};

const DISTRICT_COLUMNS: &str = "id, name, delivery_charge, created_at, updated_at";

/// Repository for district database operations.
pub struct DistrictRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DistrictRepository<'a> {
    /// Create a new district repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all districts ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<District>, RepositoryError> {
        let sql = format!("SELECT {DISTRICT_COLUMNS} FROM districts ORDER BY name ASC");
        let rows = sqlx::query_as::<_, District>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Get a district by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: DistrictId) -> Result<Option<District>, RepositoryError> {
        let sql = format!("SELECT {DISTRICT_COLUMNS} FROM districts WHERE id = $1");
        let row = sqlx::query_as::<_, District>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Create a new district.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &CreateDistrictInput) -> Result<District, RepositoryError> {
        let sql = format!(
            "INSERT INTO districts (name, delivery_charge) VALUES ($1, $2) \
             RETURNING {DISTRICT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, District>(&sql)
            .bind(&input.name)
            .bind(input.delivery_charge)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("districts_name_key")
                {
                    return RepositoryError::Conflict(format!(
                        "district '{}' already exists",
                        input.name
                    ));
                }
                RepositoryError::Database(e)
            })?;

        Ok(row)
    }

    /// Update a district.
    ///
    /// Changing the delivery charge affects future orders only; placed
    /// orders keep their snapshotted charge.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the district doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: DistrictId,
        input: &UpdateDistrictInput,
    ) -> Result<District, RepositoryError> {
        let sql = format!(
            "UPDATE districts SET \
                 name = COALESCE($2, name), \
                 delivery_charge = COALESCE($3, delivery_charge), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {DISTRICT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, District>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(input.delivery_charge)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row)
    }

    /// Delete a district.
    ///
    /// # Returns
    ///
    /// Returns `true` if the district was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if orders reference it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: DistrictId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM districts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("orders_district_id_fkey")
                {
                    return RepositoryError::Conflict(
                        "district is referenced by existing orders".to_string(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
