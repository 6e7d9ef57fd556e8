//! Tamarind Commerce - catalog and order domain layer.
//!
//! Everything both binaries share lives here: domain models, `PostgreSQL`
//! repositories, the order placement/update service, and image storage.
//! The storefront and admin binaries stay thin HTTP layers on top.
//!
//! # Modules
//!
//! - [`models`] - Domain records and input/filter types
//! - [`db`] - `sqlx` repositories over the catalog database
//! - [`services`] - Order placement, order updates, and image storage
//!
//! # Database
//!
//! One catalog database (`DATABASE_URL`) holds categories, products,
//! districts, orders, order items and slider items. Migrations live in
//! `crates/commerce/migrations/` and run via:
//!
//! ```bash
//! cargo run -p tamarind-cli -- migrate
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod db;
pub mod models;
pub mod services;
