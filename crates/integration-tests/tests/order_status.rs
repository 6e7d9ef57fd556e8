//! Integration tests for the order status transition graph.
//!
//! These verify the lifecycle contract the admin API enforces on order
//! updates, without requiring a database.

use tamarind_core::{OrderStatus, PaymentStatus};

// =============================================================================
// Happy Path
// =============================================================================

/// The full fulfillment path walks forward one hop at a time.
#[test]
fn test_fulfillment_path() {
    let path = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    for pair in path.windows(2) {
        let [from, to] = pair else { unreachable!() };
        assert!(
            from.can_transition_to(*to),
            "{from} -> {to} should be allowed"
        );
    }
}

#[test]
fn test_cancellation_window_closes_at_shipping() {
    assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
    assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
    assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Cancelled));

    // Once shipped, the order can only be delivered.
    assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
    assert_eq!(
        OrderStatus::Shipped.allowed_next(),
        &[OrderStatus::Delivered]
    );
}

// =============================================================================
// Rejections
// =============================================================================

/// A delivered order can never move back into fulfillment.
#[test]
fn test_delivered_to_processing_rejected() {
    assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Processing));
}

#[test]
fn test_skipping_states_rejected() {
    assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
    assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
    assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Delivered));
}

#[test]
fn test_cancelled_is_final() {
    for next in OrderStatus::ALL {
        assert!(!OrderStatus::Cancelled.can_transition_to(next));
    }
}

/// Every (current, requested) pair has a definite accept/reject answer, and
/// the accepted set is exactly the allowed-next set.
#[test]
fn test_table_is_total_and_consistent() {
    for current in OrderStatus::ALL {
        let allowed = current.allowed_next();
        for requested in OrderStatus::ALL {
            assert_eq!(
                current.can_transition_to(requested),
                allowed.contains(&requested),
                "inconsistent answer for {current} -> {requested}"
            );
        }
        assert_eq!(current.is_terminal(), allowed.is_empty());
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Payment status has no graph: it serializes and parses, nothing more.
#[test]
fn test_payment_status_free_form() {
    for status in [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ] {
        let json = serde_json::to_string(&status).expect("serialize");
        let back: PaymentStatus = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, status);
    }
}
