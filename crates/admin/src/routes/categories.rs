//! Category CRUD handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use tamarind_commerce::db::CategoryRepository;
use tamarind_commerce::models::{Category, CreateCategoryInput, UpdateCategoryInput};
use tamarind_core::{ApiResponse, CategoryId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the category listing.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQuery {
    /// When true, only active categories are returned.
    #[serde(default)]
    pub active_only: bool,
}

/// List categories ordered by name.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CategoriesQuery>,
) -> Result<Json<ApiResponse<Vec<Category>>>> {
    let categories = CategoryRepository::new(state.pool())
        .list(query.active_only)
        .await?;

    Ok(Json(ApiResponse::ok(categories)))
}

/// Category detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<ApiResponse<Category>>> {
    let category = CategoryRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    Ok(Json(ApiResponse::ok(category)))
}

/// Create a category. Duplicate slugs are a 409.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> Result<Json<ApiResponse<Category>>> {
    if input.name.trim().is_empty() || input.slug.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and slug are required".to_string(),
        ));
    }

    let category = CategoryRepository::new(state.pool()).create(&input).await?;

    Ok(Json(ApiResponse::with_message(
        category,
        "Category created",
    )))
}

/// Update a category.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(input): Json<UpdateCategoryInput>,
) -> Result<Json<ApiResponse<Category>>> {
    let category = CategoryRepository::new(state.pool())
        .update(id, &input)
        .await?;

    Ok(Json(ApiResponse::with_message(
        category,
        "Category updated",
    )))
}

/// Delete a category. A category that still has products is a 409.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<ApiResponse<()>>> {
    let deleted = CategoryRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("category {id}")));
    }

    Ok(Json(ApiResponse::message_only("Category deleted")))
}
