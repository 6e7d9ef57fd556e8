//! Cart route handlers.
//!
//! The cart lives in the session under a single fixed key. Every mutation
//! loads it, applies the change in memory, and writes it back, so it
//! survives page reloads without any server-authoritative copy.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use tamarind_commerce::db::ProductRepository;
use tamarind_core::{ApiResponse, ProductId};

use crate::error::{AppError, Result};
use crate::models::cart::{Cart, CartItem, CartProduct};
use crate::models::session::keys;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, defaulting to an empty one.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(keys::CART)
        .await?
        .unwrap_or_default())
}

/// Persist the cart back to the session.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

// =============================================================================
// Views
// =============================================================================

/// Cart payload returned to the client: the lines plus derived totals.
#[derive(Debug, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub total_price: Decimal,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Current cart with totals.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<ApiResponse<CartSummary>>> {
    let cart = load_cart(&session).await?;
    Ok(Json(ApiResponse::ok(CartSummary::from(&cart))))
}

/// Add a product to the cart.
///
/// Looks the product up so the cart line carries a snapshot of its name and
/// prices. Unknown or inactive products are a 404. Stock is not checked
/// here; checkout validates against live stock.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<ApiResponse<CartSummary>>> {
    let product = ProductRepository::new(state.pool())
        .get(request.product_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let snapshot = CartProduct {
        id: product.id,
        name: product.name,
        price: product.price,
        sale_price: product.sale_price,
        image: product.images.first().cloned(),
    };

    let mut cart = load_cart(&session).await?;
    cart.add_item(snapshot, request.quantity.unwrap_or(1));
    save_cart(&session, &cart).await?;

    Ok(Json(ApiResponse::ok(CartSummary::from(&cart))))
}

/// Set a line's quantity. A quantity of 0 removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<ApiResponse<CartSummary>>> {
    let mut cart = load_cart(&session).await?;
    cart.update_quantity(request.product_id, request.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(ApiResponse::ok(CartSummary::from(&cart))))
}

/// Remove a line entirely.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<ApiResponse<CartSummary>>> {
    let mut cart = load_cart(&session).await?;
    cart.remove_item(product_id);
    save_cart(&session, &cart).await?;

    Ok(Json(ApiResponse::ok(CartSummary::from(&cart))))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<ApiResponse<CartSummary>>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(ApiResponse::ok(CartSummary::from(&cart))))
}
