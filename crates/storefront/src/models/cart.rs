//! The visitor's shopping cart.
//!
//! A cart is a plain in-memory value: an ordered collection of product
//! snapshots keyed by product ID, each with a quantity. All mutations are
//! synchronous and infallible; the route layer persists the cart to the
//! session after every change. Nothing here talks to the database.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tamarind_core::{ProductId, effective_price};

/// The product snapshot stored in a cart line.
///
/// Captured when the item is added; later catalog edits don't touch carts.
/// Checkout re-reads the live rows, so a stale snapshot can't oversell or
/// change what gets charged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartProduct {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Regular unit price at add time.
    pub price: Decimal,
    /// Sale price at add time, if any.
    pub sale_price: Option<Decimal>,
    /// First product image, if any.
    pub image: Option<String>,
}

impl CartProduct {
    /// The price a customer pays for one unit, sale-aware.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        effective_price(self.price, self.sale_price)
    }
}

/// One cart line: a product snapshot and a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: CartProduct,
    pub quantity: u32,
}

impl CartItem {
    /// The line total: effective unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.effective_price() * Decimal::from(self.quantity)
    }
}

/// The cart itself. Lines keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` units of a product.
    ///
    /// If the product is already in the cart its quantity is incremented;
    /// otherwise a new line is appended. Adding zero units of an absent
    /// product is a no-op. Stock is not checked here; checkout validates
    /// against live stock.
    pub fn add_item(&mut self, product: CartProduct, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += quantity;
        } else if quantity > 0 {
            self.items.push(CartItem { product, quantity });
        }
    }

    /// Set the quantity of a line. A quantity below 1 removes the line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity < 1 {
            self.remove_item(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Remove a line entirely.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Empty the cart. Called after successful checkout.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total unit count across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Total price across all lines, using effective unit prices.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn snapshot(id: i32, price: Decimal) -> CartProduct {
        CartProduct {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price,
            sale_price: None,
            image: None,
        }
    }

    #[test]
    fn test_add_new_and_existing_items() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, d(500)), 1);
        cart.add_item(snapshot(2, d(300)), 1);
        cart.add_item(snapshot(1, d(500)), 1);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_totals_scenario() {
        // 500 x 2 + 300 x 1 = 1300; delivery is added at checkout, not here.
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, d(500)), 2);
        cart.add_item(snapshot(2, d(300)), 1);

        assert_eq!(cart.total_price(), d(1300));
        assert_eq!(cart.total_price() + d(60), d(1360));
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, d(500)), 2);
        let before = cart.total_price();

        cart.add_item(snapshot(2, d(300)), 0);

        assert_eq!(cart.total_price(), before);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_item() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, d(500)), 2);
        cart.update_quantity(ProductId::new(1), 0);

        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, d(500)), 2);
        cart.update_quantity(ProductId::new(1), 5);

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), d(2500));
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, d(500)), 2);
        cart.update_quantity(ProductId::new(99), 4);

        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, d(500)), 2);
        cart.add_item(snapshot(2, d(300)), 1);

        cart.remove_item(ProductId::new(1));
        assert_eq!(cart.items().len(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_sale_price_used_in_totals() {
        let mut discounted = snapshot(1, d(500));
        discounted.sale_price = Some(d(450));

        let mut cart = Cart::new();
        cart.add_item(discounted, 2);

        assert_eq!(cart.total_price(), d(900));
    }

    #[test]
    fn test_sale_price_not_lower_is_ignored() {
        let mut item = snapshot(1, d(500));
        item.sale_price = Some(d(550));

        let mut cart = Cart::new();
        cart.add_item(item, 1);

        assert_eq!(cart.total_price(), d(500));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add_item(snapshot(1, d(500)), 2);

        let json = serde_json::to_string(&cart).expect("serialize");
        let back: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cart);
    }
}
