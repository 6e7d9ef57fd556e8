//! Integration tests for order pipeline error reporting.
//!
//! The storefront surfaces these messages verbatim in the envelope's
//! `error` field, so their wording is part of the API contract.

use tamarind_commerce::db::RepositoryError;
use tamarind_commerce::services::OrderError;
use tamarind_core::{DistrictId, OrderId, OrderStatus, ProductId};

/// Stock rejections name the product and both quantities.
#[test]
fn test_insufficient_stock_message() {
    let err = OrderError::InsufficientStock {
        name: "Clay Teapot".to_string(),
        requested: 3,
        available: 2,
    };

    let message = err.to_string();
    assert!(message.contains("Clay Teapot"));
    assert!(message.contains('3'));
    assert!(message.contains('2'));
}

#[test]
fn test_invalid_transition_message_names_both_states() {
    let err = OrderError::InvalidTransition {
        from: OrderStatus::Delivered,
        to: OrderStatus::Processing,
    };

    let message = err.to_string();
    assert!(message.contains("delivered"));
    assert!(message.contains("processing"));
}

#[test]
fn test_lookup_errors_name_the_id() {
    assert!(
        OrderError::ProductNotFound(ProductId::new(42))
            .to_string()
            .contains("42")
    );
    assert!(
        OrderError::InvalidDistrict(DistrictId::new(7))
            .to_string()
            .contains('7')
    );
    assert!(OrderError::NotFound(OrderId::new(9)).to_string().contains('9'));
}

/// Repository failures pass through transparently; the HTTP layer decides
/// what the client sees.
#[test]
fn test_repository_error_is_transparent() {
    let err = OrderError::from(RepositoryError::Conflict("slug already in use".to_string()));
    assert_eq!(err.to_string(), "constraint violation: slug already in use");
}
