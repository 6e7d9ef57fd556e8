//! Storefront-local models.

pub mod cart;
pub mod session;

pub use cart::{Cart, CartItem, CartProduct};
