//! Product CRUD handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use tamarind_commerce::db::ProductRepository;
use tamarind_commerce::models::list::{SortOrder, page_bounds};
use tamarind_commerce::models::{
    CreateProductInput, Product, ProductFilter, ProductSortKey, UpdateProductInput,
};
use tamarind_core::{ApiResponse, CategoryId, Pagination, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub category_id: Option<i32>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ProductsQuery {
    fn into_filter(self) -> ProductFilter {
        ProductFilter {
            category_id: self.category_id.map(CategoryId::new),
            is_active: self.is_active,
            is_featured: self.is_featured,
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

/// List products with filters and pagination. Unlike the storefront, this
/// sees inactive rows too.
#[instrument(skip(state))]
pub async fn list(
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

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ApiResponse::ok(product)))
}

/// Create a product. Duplicate slug or SKU is a 409.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<Json<ApiResponse<Product>>> {
    validate_product_input(&input)?;

    let product = ProductRepository::new(state.pool()).create(&input).await?;

    Ok(Json(ApiResponse::with_message(product, "Product created")))
}

/// Update a product.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(input): Json<UpdateProductInput>,
) -> Result<Json<ApiResponse<Product>>> {
    if let Some(stock) = input.stock_quantity
        && stock < 0
    {
        return Err(AppError::BadRequest(
            "stock_quantity cannot be negative".to_string(),
        ));
    }

    let product = ProductRepository::new(state.pool())
        .update(id, &input)
        .await?;

    Ok(Json(ApiResponse::with_message(product, "Product updated")))
}

/// Delete a product. Products referenced by orders are a 409.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ApiResponse<()>>> {
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    Ok(Json(ApiResponse::message_only("Product deleted")))
}

fn validate_product_input(input: &CreateProductInput) -> Result<()> {
    if input.name.trim().is_empty() || input.slug.trim().is_empty() || input.sku.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "name, slug and sku are required".to_string(),
        ));
    }
    if input.price.is_sign_negative() {
        return Err(AppError::BadRequest("price cannot be negative".to_string()));
    }
    if input.stock_quantity < 0 {
        return Err(AppError::BadRequest(
            "stock_quantity cannot be negative".to_string(),
        ));
    }
    Ok(())
}
