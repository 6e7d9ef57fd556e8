//! Integration tests for Tamarind Market.
//!
//! # Test Categories
//!
//! - `order_status` - The order status transition graph
//! - `cart_checkout` - Cart totals feeding the checkout scenarios
//! - `api_envelope` - The JSON envelope contract shared by both binaries
//!
//! These tests exercise cross-crate behavior without a live database or
//! running server; repository-level behavior is covered by each crate's
//! own tests.
