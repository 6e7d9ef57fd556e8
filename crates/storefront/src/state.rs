//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use tamarind_commerce::db::{CategoryRepository, DistrictRepository, SliderRepository};
use tamarind_commerce::models::{Category, District, SliderItem};

use crate::config::StorefrontConfig;
use crate::error::AppError;

/// How long cached catalog reads stay fresh.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    catalog: CatalogCache,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog: CatalogCache::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Active categories, cached for [`CATALOG_CACHE_TTL`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the underlying query fails.
    pub async fn active_categories(&self) -> Result<Arc<Vec<Category>>, AppError> {
        let pool = self.inner.pool.clone();
        self.inner
            .catalog
            .categories
            .try_get_with((), async move {
                CategoryRepository::new(&pool)
                    .list(true)
                    .await
                    .map(Arc::new)
            })
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    /// All districts, cached for [`CATALOG_CACHE_TTL`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the underlying query fails.
    pub async fn districts(&self) -> Result<Arc<Vec<District>>, AppError> {
        let pool = self.inner.pool.clone();
        self.inner
            .catalog
            .districts
            .try_get_with((), async move {
                DistrictRepository::new(&pool).list().await.map(Arc::new)
            })
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    /// Active slider items in carousel order, cached for [`CATALOG_CACHE_TTL`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the underlying query fails.
    pub async fn active_slider(&self) -> Result<Arc<Vec<SliderItem>>, AppError> {
        let pool = self.inner.pool.clone();
        self.inner
            .catalog
            .slider
            .try_get_with((), async move {
                SliderRepository::new(&pool).list(true).await.map(Arc::new)
            })
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }
}

/// Short-TTL caches for hot catalog reads.
///
/// These lists sit on every page of the storefront; a 60 second TTL keeps
/// admin edits visible quickly without hammering the database.
struct CatalogCache {
    categories: Cache<(), Arc<Vec<Category>>>,
    districts: Cache<(), Arc<Vec<District>>>,
    slider: Cache<(), Arc<Vec<SliderItem>>>,
}

impl CatalogCache {
    fn new() -> Self {
        Self {
            categories: Cache::builder()
                .max_capacity(1)
                .time_to_live(CATALOG_CACHE_TTL)
                .build(),
            districts: Cache::builder()
                .max_capacity(1)
                .time_to_live(CATALOG_CACHE_TTL)
                .build(),
            slider: Cache::builder()
                .max_capacity(1)
                .time_to_live(CATALOG_CACHE_TTL)
                .build(),
        }
    }
}
