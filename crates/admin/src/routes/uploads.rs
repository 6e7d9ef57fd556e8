//! Image upload handler.

use axum::{
    Json,
    extract::{Multipart, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use tamarind_commerce::services::StoredImage;
use tamarind_core::ApiResponse;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the upload endpoint.
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Target folder under the upload root, e.g. `products` or `slider`.
    pub folder: String,
}

/// Upload an image and return its public URL.
///
/// Accepts a multipart form; the first file field wins. The stored filename
/// is timestamped, so repeated uploads never collide.
#[instrument(skip(state, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<StoredImage>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(ToString::to_string) else {
            // Not a file field; skip.
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;

        let stored = state
            .images()
            .store(&query.folder, &file_name, &bytes)
            .await?;

        tracing::info!(url = %stored.url, "image uploaded");

        return Ok(Json(ApiResponse::with_message(stored, "Image uploaded")));
    }

    Err(AppError::BadRequest(
        "multipart body contained no file field".to_string(),
    ))
}
