//! Integration tests for the JSON envelope contract.
//!
//! Both binaries respond with `{ success, data?, error?, message?,
//! pagination? }`. Clients rely on absent-not-null optional fields.

use serde_json::json;
use tamarind_core::{ApiResponse, Pagination};

#[test]
fn test_success_envelope_shape() {
    let resp = ApiResponse::ok(json!({ "id": 1, "name": "Clay Teapot" }));
    let value = serde_json::to_value(&resp).expect("serialize");

    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["name"], "Clay Teapot");
    assert!(value.get("error").is_none());
    assert!(value.get("pagination").is_none());
}

#[test]
fn test_error_envelope_shape() {
    let resp = ApiResponse::<serde_json::Value>::error("insufficient stock for Clay Teapot");
    let value = serde_json::to_value(&resp).expect("serialize");

    assert_eq!(value["success"], false);
    assert_eq!(value["error"], "insufficient stock for Clay Teapot");
    assert!(value.get("data").is_none());
    assert!(value.get("message").is_none());
}

#[test]
fn test_message_envelope_shape() {
    let resp = ApiResponse::with_message(json!([1, 2]), "Order placed successfully");
    let value = serde_json::to_value(&resp).expect("serialize");

    assert_eq!(value["success"], true);
    assert_eq!(value["message"], "Order placed successfully");
}

#[test]
fn test_paginated_list_envelope() {
    let resp = ApiResponse::paginated(json!(["a", "b", "c"]), Pagination::new(1, 20, 53));
    let value = serde_json::to_value(&resp).expect("serialize");

    let pagination = &value["pagination"];
    assert_eq!(pagination["page"], 1);
    assert_eq!(pagination["limit"], 20);
    assert_eq!(pagination["total"], 53);
    assert_eq!(pagination["total_pages"], 3);
}

/// A client deserializing the envelope gets the same payload back.
#[test]
fn test_envelope_roundtrip() {
    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct OrderSummary {
        order_number: String,
        total_amount: String,
    }

    let resp = ApiResponse::ok(OrderSummary {
        order_number: "TM-20260806-4F2A".to_string(),
        total_amount: "1360".to_string(),
    });

    let json = serde_json::to_string(&resp).expect("serialize");
    let back: ApiResponse<OrderSummary> = serde_json::from_str(&json).expect("deserialize");

    assert!(back.success);
    assert_eq!(back.data, resp.data);
    assert!(back.error.is_none());
}
