//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database ping)
//!
//! # Categories
//! GET    /api/categories        - List categories
//! POST   /api/categories        - Create category
//! GET    /api/categories/{id}   - Category detail
//! PUT    /api/categories/{id}   - Update category
//! DELETE /api/categories/{id}   - Delete category (409 while products remain)
//!
//! # Products
//! GET    /api/products          - List products (filters + pagination)
//! POST   /api/products          - Create product
//! GET    /api/products/{id}     - Product detail
//! PUT    /api/products/{id}     - Update product
//! DELETE /api/products/{id}     - Delete product
//!
//! # Districts
//! GET    /api/districts         - List districts
//! POST   /api/districts         - Create district
//! GET    /api/districts/{id}    - District detail
//! PUT    /api/districts/{id}    - Update district
//! DELETE /api/districts/{id}    - Delete district
//!
//! # Slider
//! GET    /api/slider            - List slider items (carousel order)
//! POST   /api/slider            - Create slider item
//! GET    /api/slider/{id}       - Slider item detail
//! PUT    /api/slider/{id}       - Update slider item
//! DELETE /api/slider/{id}       - Delete slider item
//!
//! # Orders
//! GET    /api/orders            - List orders (filters + pagination)
//! POST   /api/orders            - Place order (same pipeline as storefront)
//! GET    /api/orders/{id}       - Order detail with items and district
//! PUT    /api/orders/{id}       - Update order (transition-checked)
//! DELETE /api/orders/{id}       - Delete order
//!
//! # Uploads
//! POST   /api/uploads?folder=.. - Upload an image, returns its public URL
//! ```

pub mod categories;
pub mod districts;
pub mod orders;
pub mod products;
pub mod sliders;
pub mod uploads;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route(
            "/{id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::delete),
        )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the district routes router.
pub fn district_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(districts::list).post(districts::create))
        .route(
            "/{id}",
            get(districts::show)
                .put(districts::update)
                .delete(districts::delete),
        )
}

/// Create the slider routes router.
pub fn slider_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sliders::list).post(sliders::create))
        .route(
            "/{id}",
            get(sliders::show)
                .put(sliders::update)
                .delete(sliders::delete),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::place))
        .route(
            "/{id}",
            get(orders::show).put(orders::update).delete(orders::delete),
        )
}

/// Create all routes for the admin API.
pub fn routes() -> Router<AppState> {
    Router::new().nest(
        "/api",
        Router::new()
            .nest("/categories", category_routes())
            .nest("/products", product_routes())
            .nest("/districts", district_routes())
            .nest("/slider", slider_routes())
            .nest("/orders", order_routes())
            .route("/uploads", post(uploads::upload)),
    )
}
