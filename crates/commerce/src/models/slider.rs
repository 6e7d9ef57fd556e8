//! Home page slider domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tamarind_core::SliderItemId;

/// A banner in the storefront home page carousel.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SliderItem {
    /// Unique slider item ID.
    pub id: SliderItemId,
    /// Headline text.
    pub title: String,
    /// Optional secondary line.
    pub subtitle: Option<String>,
    /// Banner image URL.
    pub image_url: String,
    /// Optional click-through target.
    pub link_url: Option<String>,
    /// Position within the carousel, ascending.
    pub sort_order: i32,
    /// Whether the banner is shown.
    pub is_active: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a slider item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSliderItemInput {
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Input for updating a slider item. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSliderItemInput {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

const fn default_true() -> bool {
    true
}
