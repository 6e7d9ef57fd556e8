//! Order domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tamarind_core::{DistrictId, OrderId, OrderItemId, OrderStatus, PaymentStatus, ProductId};

use super::district::District;
use super::list::SortOrder;

/// A placed order.
///
/// `total_amount` equals `subtotal + delivery_charge` at creation time. It is
/// only recomputed when an update changes the delivery district.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Human-facing order number, e.g. `TM-20260806-4F2A`.
    pub order_number: String,
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact phone.
    pub customer_phone: String,
    /// Delivery address.
    pub customer_address: String,
    /// Delivery district at placement time.
    pub district_id: DistrictId,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Flat delivery fee snapshotted from the district.
    pub delivery_charge: Decimal,
    /// `subtotal + delivery_charge`.
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Payment status, unconstrained.
    pub payment_status: PaymentStatus,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A line item within an order.
///
/// `unit_price` snapshots the product's stored price at placement time;
/// later catalog edits never change it. `total_price` is always
/// `unit_price * quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    /// Unique line item ID.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Ordered product.
    pub product_id: ProductId,
    /// Product name snapshot at placement time.
    pub product_name: String,
    /// Units ordered. Always >= 1.
    pub quantity: i32,
    /// Per-unit price snapshot.
    pub unit_price: Decimal,
    /// `unit_price * quantity`.
    pub total_price: Decimal,
}

/// An order joined with its line items and delivery district.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    /// The order itself.
    #[serde(flatten)]
    pub order: Order,
    /// Line items.
    pub items: Vec<OrderItem>,
    /// The delivery district.
    pub district: District,
}

/// One requested line of a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineInput {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Input for placing an order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderInput {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub district_id: DistrictId,
    pub items: Vec<OrderLineInput>,
    pub notes: Option<String>,
}

/// Input for updating an order. Absent fields are left unchanged.
///
/// A `status` change is validated against the transition graph. A
/// `district_id` change recomputes `delivery_charge` and `total_amount`
/// from the stored subtotal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderInput {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub district_id: Option<DistrictId>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub notes: Option<String>,
}

/// Sortable columns for order lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSortKey {
    #[default]
    CreatedAt,
    TotalAmount,
    OrderNumber,
}

impl OrderSortKey {
    /// Parse a `sort_by` query parameter; unknown values fall back to
    /// creation time.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "total_amount" => Self::TotalAmount,
            "order_number" => Self::OrderNumber,
            _ => Self::CreatedAt,
        }
    }

    /// The column this key sorts on.
    #[must_use]
    pub const fn as_column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::TotalAmount => "total_amount",
            Self::OrderNumber => "order_number",
        }
    }
}

/// Filter criteria for listing orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Filter by lifecycle status.
    pub status: Option<OrderStatus>,
    /// Filter by payment status.
    pub payment_status: Option<PaymentStatus>,
    /// Exact match on customer phone.
    pub customer_phone: Option<String>,
    /// Only orders placed at or after this instant.
    pub date_from: Option<DateTime<Utc>>,
    /// Only orders placed at or before this instant.
    pub date_to: Option<DateTime<Utc>>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size.
    pub limit: Option<i64>,
    /// Sort column.
    pub sort_by: OrderSortKey,
    /// Sort direction.
    pub sort_order: SortOrder,
}
