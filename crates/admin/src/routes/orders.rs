//! Order management handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use tamarind_commerce::db::OrderRepository;
use tamarind_commerce::models::list::{SortOrder, page_bounds};
use tamarind_commerce::models::{
    CreateOrderInput, Order, OrderDetail, OrderFilter, OrderSortKey, UpdateOrderInput,
};
use tamarind_commerce::services::OrderService;
use tamarind_core::{ApiResponse, OrderId, OrderStatus, Pagination, PaymentStatus};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the order listing.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub customer_phone: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl OrdersQuery {
    /// Build the repository filter. Unknown status strings are a 400 rather
    /// than silently matching nothing.
    fn into_filter(self) -> Result<OrderFilter> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<OrderStatus>)
            .transpose()
            .map_err(AppError::BadRequest)?;
        let payment_status = self
            .payment_status
            .as_deref()
            .map(str::parse::<PaymentStatus>)
            .transpose()
            .map_err(AppError::BadRequest)?;

        Ok(OrderFilter {
            status,
            payment_status,
            customer_phone: self.customer_phone.filter(|p| !p.trim().is_empty()),
            date_from: self.date_from,
            date_to: self.date_to,
            page: self.page,
            limit: self.limit,
            sort_by: self
                .sort_by
                .as_deref()
                .map(OrderSortKey::from_param)
                .unwrap_or_default(),
            sort_order: self
                .sort_order
                .as_deref()
                .map(SortOrder::from_param)
                .unwrap_or_default(),
        })
    }
}

/// List orders with filters and pagination.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<ApiResponse<Vec<Order>>>> {
    let filter = query.into_filter()?;
    let (page, limit, _) = page_bounds(filter.page, filter.limit);

    let (orders, total) = OrderRepository::new(state.pool()).list(&filter).await?;

    Ok(Json(ApiResponse::paginated(
        orders,
        Pagination::new(page, limit, total),
    )))
}

/// Order detail with items and district.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<ApiResponse<OrderDetail>>> {
    let detail = OrderService::new(state.pool()).get_detail(id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// Place an order through the same pipeline the storefront uses.
#[instrument(skip(state, input))]
pub async fn place(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> Result<Json<ApiResponse<OrderDetail>>> {
    let detail = OrderService::new(state.pool()).place_order(&input).await?;

    Ok(Json(ApiResponse::with_message(
        detail,
        "Order placed successfully",
    )))
}

/// Update an order.
///
/// Status changes are checked against the transition graph; a district
/// change recomputes the delivery charge and total from the stored subtotal.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(input): Json<UpdateOrderInput>,
) -> Result<Json<ApiResponse<OrderDetail>>> {
    let detail = OrderService::new(state.pool())
        .update_order(id, &input)
        .await?;

    Ok(Json(ApiResponse::with_message(detail, "Order updated")))
}

/// Delete an order and its items.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<ApiResponse<()>>> {
    let deleted = OrderRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("order {id}")));
    }

    Ok(Json(ApiResponse::message_only("Order deleted")))
}
