//! Slider item CRUD handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use tamarind_commerce::db::SliderRepository;
use tamarind_commerce::models::{CreateSliderItemInput, SliderItem, UpdateSliderItemInput};
use tamarind_core::{ApiResponse, SliderItemId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the slider listing.
#[derive(Debug, Default, Deserialize)]
pub struct SliderQuery {
    /// When true, only active items are returned.
    #[serde(default)]
    pub active_only: bool,
}

/// List slider items in carousel order.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SliderQuery>,
) -> Result<Json<ApiResponse<Vec<SliderItem>>>> {
    let items = SliderRepository::new(state.pool())
        .list(query.active_only)
        .await?;

    Ok(Json(ApiResponse::ok(items)))
}

/// Slider item detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<SliderItemId>,
) -> Result<Json<ApiResponse<SliderItem>>> {
    let item = SliderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("slider item {id}")))?;

    Ok(Json(ApiResponse::ok(item)))
}

/// Create a slider item.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSliderItemInput>,
) -> Result<Json<ApiResponse<SliderItem>>> {
    if input.title.trim().is_empty() || input.image_url.trim().is_empty() {
        return Err(AppError::BadRequest(
            "title and image_url are required".to_string(),
        ));
    }

    let item = SliderRepository::new(state.pool()).create(&input).await?;

    Ok(Json(ApiResponse::with_message(item, "Slider item created")))
}

/// Update a slider item.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<SliderItemId>,
    Json(input): Json<UpdateSliderItemInput>,
) -> Result<Json<ApiResponse<SliderItem>>> {
    let item = SliderRepository::new(state.pool()).update(id, &input).await?;

    Ok(Json(ApiResponse::with_message(item, "Slider item updated")))
}

/// Delete a slider item.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<SliderItemId>,
) -> Result<Json<ApiResponse<()>>> {
    let deleted = SliderRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("slider item {id}")));
    }

    Ok(Json(ApiResponse::message_only("Slider item deleted")))
}
