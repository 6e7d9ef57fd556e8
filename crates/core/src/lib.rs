//! Tamarind Core - Shared types library.
//!
//! This crate provides common types used across all Tamarind Market components:
//! - `storefront` - Public-facing JSON API
//! - `admin` - Internal administration API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, order/payment statuses, pricing rules, and the
//!   JSON response envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
