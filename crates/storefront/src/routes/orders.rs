//! Order route handlers for the storefront.

use axum::{
    Json,
    extract::{Path, State},
};
use tower_sessions::Session;
use tracing::instrument;

use tamarind_commerce::models::{CreateOrderInput, OrderDetail};
use tamarind_commerce::services::OrderService;
use tamarind_core::ApiResponse;

use crate::error::Result;
use crate::routes::cart::{load_cart, save_cart};
use crate::state::AppState;

/// Place an order.
///
/// Runs the full pipeline: validation, district and stock checks, pricing
/// from stored rows, persistence, stock decrements. On success the session
/// cart is cleared.
#[instrument(skip(state, session, input))]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<CreateOrderInput>,
) -> Result<Json<ApiResponse<OrderDetail>>> {
    let detail = OrderService::new(state.pool()).place_order(&input).await?;

    // Checkout succeeded; the visitor's cart is spent.
    let mut cart = load_cart(&session).await?;
    if !cart.is_empty() {
        cart.clear();
        save_cart(&session, &cart).await?;
    }

    Ok(Json(ApiResponse::with_message(
        detail,
        "Order placed successfully",
    )))
}

/// Look up an order by its order number.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<ApiResponse<OrderDetail>>> {
    let detail = OrderService::new(state.pool())
        .get_detail_by_number(&order_number)
        .await?;

    Ok(Json(ApiResponse::ok(detail)))
}
