//! Delivery district domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tamarind_core::DistrictId;

/// A delivery zone with a flat delivery fee.
///
/// The fee is snapshotted into each order at placement time; editing a
/// district never changes already-placed orders.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct District {
    /// Unique district ID.
    pub id: DistrictId,
    /// District name.
    pub name: String,
    /// Flat delivery fee charged for this district.
    pub delivery_charge: Decimal,
    /// When the district was created.
    pub created_at: DateTime<Utc>,
    /// When the district was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a district.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDistrictInput {
    pub name: String,
    pub delivery_charge: Decimal,
}

/// Input for updating a district. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDistrictInput {
    pub name: Option<String>,
    pub delivery_charge: Option<Decimal>,
}
