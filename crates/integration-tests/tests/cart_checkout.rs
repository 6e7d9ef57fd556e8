//! Integration tests for the cart store feeding checkout.
//!
//! The cart is a session value; checkout re-prices everything from stored
//! product rows. These tests cover the cart side of that contract and the
//! documented pricing scenarios.

use rust_decimal::Decimal;
use tamarind_core::{ProductId, effective_price};
use tamarind_storefront::models::cart::{Cart, CartProduct};

fn d(value: i64) -> Decimal {
    Decimal::from(value)
}

fn snapshot(id: i32, price: Decimal, sale_price: Option<Decimal>) -> CartProduct {
    CartProduct {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price,
        sale_price,
        image: None,
    }
}

/// Two items (500 x 2, 300 x 1) with a 60 delivery charge come to 1360.
#[test]
fn test_documented_checkout_scenario() {
    let mut cart = Cart::new();
    cart.add_item(snapshot(1, d(500), None), 2);
    cart.add_item(snapshot(2, d(300), None), 1);

    let subtotal = cart.total_price();
    let delivery_charge = d(60);

    assert_eq!(subtotal, d(1300));
    assert_eq!(subtotal + delivery_charge, d(1360));
    assert_eq!(cart.total_items(), 3);
}

/// Adding zero units changes nothing; setting a quantity to zero removes
/// the line.
#[test]
fn test_zero_quantity_edge_cases() {
    let mut cart = Cart::new();
    cart.add_item(snapshot(1, d(500), None), 2);

    let before = (cart.total_items(), cart.total_price());
    cart.add_item(snapshot(2, d(300), None), 0);
    assert_eq!((cart.total_items(), cart.total_price()), before);

    cart.update_quantity(ProductId::new(1), 0);
    assert!(cart.is_empty());
}

/// Cart display totals use the effective (sale-aware) price, while the
/// order pipeline charges the stored regular price. A discounted cart can
/// therefore show less than what checkout charges.
#[test]
fn test_cart_display_vs_charged_price() {
    let price = d(500);
    let sale = d(450);

    let mut cart = Cart::new();
    cart.add_item(snapshot(1, price, Some(sale)), 1);

    assert_eq!(cart.total_price(), sale);
    assert_eq!(effective_price(price, Some(sale)), sale);

    // What checkout charges for this line: the stored regular price.
    assert_eq!(price, d(500));
    assert_ne!(cart.total_price(), price);
}

/// A cleared cart is what the storefront persists after a successful order.
#[test]
fn test_cart_cleared_after_checkout() {
    let mut cart = Cart::new();
    cart.add_item(snapshot(1, d(500), None), 2);
    cart.add_item(snapshot(2, d(300), None), 1);

    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.total_items(), 0);
    assert_eq!(cart.total_price(), Decimal::ZERO);
}

/// The session layer round-trips the cart through JSON; totals must
/// survive.
#[test]
fn test_cart_survives_serialization() {
    let mut cart = Cart::new();
    cart.add_item(snapshot(1, d(500), Some(d(450))), 2);
    cart.add_item(snapshot(2, d(300), None), 1);

    let json = serde_json::to_string(&cart).expect("serialize");
    let restored: Cart = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored.total_items(), cart.total_items());
    assert_eq!(restored.total_price(), cart.total_price());
    assert_eq!(restored, cart);
}
