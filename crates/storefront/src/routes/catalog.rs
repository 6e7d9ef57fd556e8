//! Read-only catalog route handlers.
//!
//! Everything here is public data. Products are filtered to active rows;
//! the small hot lists (categories, districts, slider) come from the
//! short-TTL cache on [`AppState`].

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use tamarind_commerce::db::ProductRepository;
use tamarind_commerce::models::list::{SortOrder, page_bounds};
use tamarind_commerce::models::{
    Category, District, Product, ProductFilter, ProductSortKey, SliderItem,
};
use tamarind_core::{ApiResponse, CategoryId, Pagination};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub category_id: Option<i32>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ProductsQuery {
    /// Build the repository filter. The storefront only ever sees active
    /// products.
    fn into_filter(self) -> ProductFilter {
        ProductFilter {
            category_id: self.category_id.map(CategoryId::new),
            is_active: Some(true),
            is_featured: self.featured,
            search: self.search.filter(|s| !s.trim().is_empty()),
            page: self.page,
            limit: self.limit,
            sort_by: self
                .sort_by
                .as_deref()
                .map(ProductSortKey::from_param)
                .unwrap_or_default(),
            sort_order: self
                .sort_order
                .as_deref()
                .map(SortOrder::from_param)
                .unwrap_or_default(),
        }
    }
}

/// List active products with filters and pagination.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>> {
    let filter = query.into_filter();
    let (page, limit, _) = page_bounds(filter.page, filter.limit);

    let (products, total) = ProductRepository::new(state.pool()).list(&filter).await?;

    Ok(Json(ApiResponse::paginated(
        products,
        Pagination::new(page, limit, total),
    )))
}

/// Show one active product by slug.
#[instrument(skip(state))]
pub async fn show_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = ProductRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound(format!("product '{slug}'")))?;

    Ok(Json(ApiResponse::ok(product)))
}

/// List active categories.
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Category>>>> {
    let categories = state.active_categories().await?;
    Ok(Json(ApiResponse::ok(categories.as_ref().clone())))
}

/// List delivery districts with their charges.
#[instrument(skip(state))]
pub async fn list_districts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<District>>>> {
    let districts = state.districts().await?;
    Ok(Json(ApiResponse::ok(districts.as_ref().clone())))
}

/// List active slider banners in carousel order.
#[instrument(skip(state))]
pub async fn list_slider(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SliderItem>>>> {
    let slider = state.active_slider().await?;
    Ok(Json(ApiResponse::ok(slider.as_ref().clone())))
}
