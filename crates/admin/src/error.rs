//! Unified error handling for admin.
//!
//! Same envelope contract as the storefront: every failure becomes
//! `{ "success": false, "error": "..." }` with the matching status code,
//! and server-class errors are captured to Sentry first.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use tamarind_commerce::db::RepositoryError;
use tamarind_commerce::services::{OrderError, StorageError};
use tamarind_core::ApiResponse;

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Order pipeline rejected the request or failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Image upload failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error is a server-side failure worth capturing.
    fn is_server_error(&self) -> bool {
        match self {
            Self::Database(e) => !matches!(e, RepositoryError::NotFound),
            Self::Order(e) => matches!(e, OrderError::Repository(_)),
            Self::Storage(e) => matches!(e, StorageError::Io(_) | StorageError::Url(_)),
            Self::Internal(_) => true,
            Self::NotFound(_) | Self::BadRequest(_) => false,
        }
    }

    /// The HTTP status this error maps to.
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(e) => match e {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Order(e) => match e {
                OrderError::Validation(_)
                | OrderError::InvalidDistrict(_)
                | OrderError::InsufficientStock { .. }
                | OrderError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
                OrderError::NotFound(_) | OrderError::ProductNotFound(_) => StatusCode::NOT_FOUND,
                OrderError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
                OrderError::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
                OrderError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Storage(e) => match e {
                StorageError::Io(_) | StorageError::Url(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The client-facing error string. Internal details stay out of 5xx
    /// responses.
    fn client_message(&self) -> String {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            return "Internal server error".to_string();
        }
        match self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::NotFound(msg) => format!("Not found: {msg}"),
            Self::BadRequest(msg) => msg.clone(),
            other => other_message(other),
        }
    }
}

fn other_message(err: &AppError) -> String {
    match err {
        AppError::Order(e) => e.to_string(),
        AppError::Storage(e) => e.to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = self.status_code();
        let body = Json(ApiResponse::<()>::error(self.client_message()));

        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tamarind_core::OrderStatus;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_conflict_maps_to_409() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict(
                "slug already in use".to_string()
            ))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_invalid_transition_maps_to_400() {
        assert_eq!(
            get_status(AppError::Order(OrderError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Processing,
            })),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_storage_validation_maps_to_400() {
        assert_eq!(
            get_status(AppError::Storage(StorageError::EmptyFile)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Storage(StorageError::UnsupportedType(
                "exe".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::Database(RepositoryError::DataCorruption("bad row".to_string()));
        assert_eq!(err.client_message(), "Internal server error");
    }
}
