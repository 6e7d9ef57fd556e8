//! Session-stored types and keys.
//!
//! The session is the cart's only persistence boundary: one cart per
//! browser, serialized under a single fixed key, surviving reloads for as
//! long as the session cookie lives.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";
}
