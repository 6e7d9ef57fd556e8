//! District CRUD handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use tamarind_commerce::db::DistrictRepository;
use tamarind_commerce::models::{CreateDistrictInput, District, UpdateDistrictInput};
use tamarind_core::{ApiResponse, DistrictId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// List districts ordered by name.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<District>>>> {
    let districts = DistrictRepository::new(state.pool()).list().await?;
    Ok(Json(ApiResponse::ok(districts)))
}

/// District detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<DistrictId>,
) -> Result<Json<ApiResponse<District>>> {
    let district = DistrictRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("district {id}")))?;

    Ok(Json(ApiResponse::ok(district)))
}

/// Create a district. Duplicate names are a 409.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDistrictInput>,
) -> Result<Json<ApiResponse<District>>> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if input.delivery_charge.is_sign_negative() {
        return Err(AppError::BadRequest(
            "delivery_charge cannot be negative".to_string(),
        ));
    }

    let district = DistrictRepository::new(state.pool()).create(&input).await?;

    Ok(Json(ApiResponse::with_message(district, "District created")))
}

/// Update a district. Placed orders keep their snapshotted charge.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DistrictId>,
    Json(input): Json<UpdateDistrictInput>,
) -> Result<Json<ApiResponse<District>>> {
    if let Some(charge) = input.delivery_charge
        && charge.is_sign_negative()
    {
        return Err(AppError::BadRequest(
            "delivery_charge cannot be negative".to_string(),
        ));
    }

    let district = DistrictRepository::new(state.pool())
        .update(id, &input)
        .await?;

    Ok(Json(ApiResponse::with_message(district, "District updated")))
}

/// Delete a district. Districts referenced by orders are a 409.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DistrictId>,
) -> Result<Json<ApiResponse<()>>> {
    let deleted = DistrictRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("district {id}")));
    }

    Ok(Json(ApiResponse::message_only("District deleted")))
}
