//! Category domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tamarind_core::CategoryId;

/// A product category. Each product references at most one category.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL-safe unique slug.
    pub slug: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional thumbnail image URL.
    pub image_url: Option<String>,
    /// Optional banner image URL.
    pub banner_url: Option<String>,
    /// Whether the category is visible on the storefront.
    pub is_active: bool,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub banner_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Input for updating a category. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub banner_url: Option<String>,
    pub is_active: Option<bool>,
}

const fn default_true() -> bool {
    true
}
