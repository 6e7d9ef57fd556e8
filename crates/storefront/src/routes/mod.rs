//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database ping)
//!
//! # Catalog (read-only)
//! GET  /api/products                - Product listing (filters + pagination)
//! GET  /api/products/{slug}         - Product detail
//! GET  /api/categories              - Active categories
//! GET  /api/districts               - Delivery districts with charges
//! GET  /api/slider                  - Active home page banners
//!
//! # Cart (session-backed)
//! GET    /api/cart                  - Current cart with totals
//! POST   /api/cart/items            - Add a product to the cart
//! PUT    /api/cart/items            - Set a line's quantity
//! DELETE /api/cart/items/{id}       - Remove a line
//! DELETE /api/cart                  - Clear the cart
//!
//! # Orders
//! POST /api/orders                  - Place an order (clears the cart)
//! GET  /api/orders/{order_number}   - Order lookup by number
//! ```

pub mod cart;
pub mod catalog;
pub mod orders;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list_products))
        .route("/products/{slug}", get(catalog::show_product))
        .route("/categories", get(catalog::list_categories))
        .route("/districts", get(catalog::list_districts))
        .route("/slider", get(catalog::list_slider))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show).delete(cart::clear))
        .route("/cart/items", post(cart::add).put(cart::update))
        .route("/cart/items/{product_id}", delete(cart::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(orders::place))
        .route("/orders/{order_number}", get(orders::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new().nest(
        "/api",
        catalog_routes().merge(cart_routes()).merge(order_routes()),
    )
}
