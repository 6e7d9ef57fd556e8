//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! tamarind-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string for the catalog database
//!
//! Migration files live in `crates/commerce/migrations/`.

use secrecy::SecretString;
use thiserror::Error;

use tamarind_commerce::db;

/// Errors from running migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run catalog database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if `DATABASE_URL` is unset, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to catalog database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running catalog migrations...");
    sqlx::migrate!("../commerce/migrations").run(&pool).await?;

    tracing::info!("Catalog migrations complete!");
    Ok(())
}
