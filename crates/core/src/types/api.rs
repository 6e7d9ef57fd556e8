//! JSON response envelope shared by the storefront and admin APIs.
//!
//! Every endpoint responds with the same shape:
//!
//! ```json
//! { "success": true, "data": ..., "message": "...", "pagination": {...} }
//! { "success": false, "error": "..." }
//! ```
//!
//! Absent fields are omitted from the serialized output entirely.

use serde::{Deserialize, Serialize};

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: i64,
    /// Page size.
    pub limit: i64,
    /// Total number of matching rows.
    pub total: i64,
    /// Total number of pages.
    pub total_pages: i64,
}

impl Pagination {
    /// Build pagination metadata from a page request and a total row count.
    #[must_use]
    pub const fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// The response envelope wrapping every API payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// The payload, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// A human-readable error string, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// An optional informational message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Pagination metadata for list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            pagination: None,
        }
    }

    /// A successful response with an informational message.
    #[must_use]
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
            pagination: None,
        }
    }

    /// A successful list response with pagination metadata.
    #[must_use]
    pub const fn paginated(data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            pagination: Some(pagination),
        }
    }

    /// A successful response with no payload, just a message.
    #[must_use]
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
            pagination: None,
        }
    }

    /// A failed response carrying an error string.
    #[must_use]
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
            pagination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_omits_absent_fields() {
        let resp = ApiResponse::ok(vec![1, 2, 3]);
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json.get("error").is_none());
        assert!(json.get("message").is_none());
        assert!(json.get("pagination").is_none());
    }

    #[test]
    fn test_error_envelope() {
        let resp = ApiResponse::<()>::error("boom");
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_paginated_envelope() {
        let resp = ApiResponse::paginated(vec!["a", "b"], Pagination::new(2, 10, 25));
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["pagination"]["page"], 2);
        assert_eq!(json["pagination"]["total"], 25);
        assert_eq!(json["pagination"]["total_pages"], 3);
    }

    #[test]
    fn test_pagination_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(1, 0, 11).total_pages, 0);
    }
}
