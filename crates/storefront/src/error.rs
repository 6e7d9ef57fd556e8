//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; the response body is always the JSON envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use tamarind_commerce::db::RepositoryError;
use tamarind_commerce::services::OrderError;
use tamarind_core::ApiResponse;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Order pipeline rejected the request or failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

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
            Self::Session(_) | Self::Internal(_) => true,
            Self::NotFound(_) | Self::BadRequest(_) => false,
        }
    }

    /// The HTTP status this error maps to.
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(e) => repository_status(e),
            Self::Order(e) => order_status(e),
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The client-facing error string. Internal details stay out of 5xx
    /// responses.
    fn client_message(&self) -> String {
        match self {
            Self::Database(e) => repository_message(e),
            Self::Order(e) => order_message(e),
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::NotFound(msg) => format!("Not found: {msg}"),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

fn repository_status(e: &RepositoryError) -> StatusCode {
    match e {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn repository_message(e: &RepositoryError) -> String {
    match e {
        RepositoryError::NotFound => "Not found".to_string(),
        RepositoryError::Conflict(msg) => msg.clone(),
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            "Internal server error".to_string()
        }
    }
}

fn order_status(e: &OrderError) -> StatusCode {
    match e {
        OrderError::Validation(_)
        | OrderError::InvalidDistrict(_)
        | OrderError::InsufficientStock { .. }
        | OrderError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
        OrderError::NotFound(_) | OrderError::ProductNotFound(_) => StatusCode::NOT_FOUND,
        OrderError::Repository(e) => repository_status(e),
    }
}

fn order_message(e: &OrderError) -> String {
    match e {
        OrderError::Repository(inner) => repository_message(inner),
        other => other.to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
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
    use tamarind_core::{OrderStatus, ProductId};

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_basic_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("product".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_order_error_status_codes() {
        assert_eq!(
            get_status(AppError::Order(OrderError::Validation("x".to_string()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Order(OrderError::ProductNotFound(
                ProductId::new(9)
            ))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Order(OrderError::InsufficientStock {
                name: "Clay Teapot".to_string(),
                requested: 3,
                available: 2,
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Order(OrderError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Processing,
            })),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_repository_error_status_codes() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict(
                "dup".to_string()
            ))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::Internal("connection pool exhausted".to_string());
        assert_eq!(err.client_message(), "Internal server error");
    }
}
