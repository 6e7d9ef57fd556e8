//! Database operations for the catalog `PostgreSQL`.
//!
//! # Tables
//!
//! - `categories` - Product categories
//! - `products` - Catalog products (stock, prices, images)
//! - `districts` - Delivery zones with flat fees
//! - `orders` / `order_items` - Placed orders and their price snapshots
//! - `slider_items` - Home page carousel banners
//! - `sessions` - tower-sessions storage (storefront cart persistence)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/commerce/migrations/` and run via:
//! ```bash
//! cargo run -p tamarind-cli -- migrate
//! ```

pub mod categories;
pub mod districts;
pub mod orders;
pub mod products;
pub mod sliders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use categories::CategoryRepository;
pub use districts::DistrictRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use sliders::SliderRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
