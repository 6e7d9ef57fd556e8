//! Database operations for orders and order items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use tamarind_core::{DistrictId, OrderId, OrderStatus, PaymentStatus, ProductId};

use super::RepositoryError;
use crate::models::list::page_bounds;
use crate::models::{Order, OrderFilter, OrderItem};

const ORDER_COLUMNS: &str = "id, order_number, customer_name, customer_phone, \
     customer_address, district_id, subtotal, delivery_charge, total_amount, \
     status, payment_status, notes, created_at, updated_at";

const ITEM_COLUMNS: &str =
    "id, order_id, product_id, product_name, quantity, unit_price, total_price";

const ORDER_FILTER_WHERE: &str = "($1::text IS NULL OR status = $1) \
     AND ($2::text IS NULL OR payment_status = $2) \
     AND ($3::text IS NULL OR customer_phone = $3) \
     AND ($4::timestamptz IS NULL OR created_at >= $4) \
     AND ($5::timestamptz IS NULL OR created_at <= $5)";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for order queries. Status columns are stored as text
/// and parsed on the way out.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    order_number: String,
    customer_name: String,
    customer_phone: String,
    customer_address: String,
    district_id: DistrictId,
    subtotal: Decimal,
    delivery_charge: Decimal,
    total_amount: Decimal,
    status: String,
    payment_status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;
        let payment_status: PaymentStatus = row
            .payment_status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: row.id,
            order_number: row.order_number,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            customer_address: row.customer_address,
            district_id: row.district_id,
            subtotal: row.subtotal,
            delivery_charge: row.delivery_charge,
            total_amount: row.total_amount,
            status,
            payment_status,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Insert / Update Types
// =============================================================================

/// A fully computed order row ready for insertion. Totals are the service's
/// responsibility; the repository persists them as given.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub district_id: DistrictId,
    pub subtotal: Decimal,
    pub delivery_charge: Decimal,
    pub total_amount: Decimal,
    pub notes: Option<String>,
}

/// A computed order line ready for insertion.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Field changes for an order update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub district_id: Option<DistrictId>,
    pub delivery_charge: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub notes: Option<String>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order with `pending` lifecycle and payment status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new_order: &NewOrder) -> Result<Order, RepositoryError> {
        let sql = format!(
            "INSERT INTO orders (order_number, customer_name, customer_phone, \
                 customer_address, district_id, subtotal, delivery_charge, \
                 total_amount, status, payment_status, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', 'pending', $9) \
             RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(&new_order.order_number)
            .bind(&new_order.customer_name)
            .bind(&new_order.customer_phone)
            .bind(&new_order.customer_address)
            .bind(new_order.district_id)
            .bind(new_order.subtotal)
            .bind(new_order.delivery_charge)
            .bind(new_order.total_amount)
            .bind(&new_order.notes)
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }

    /// Insert the line items for an order.
    ///
    /// Items are inserted one by one; the first failure aborts the rest and
    /// propagates, leaving earlier rows in place for the caller to clean up.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails.
    pub async fn insert_items(
        &self,
        order_id: OrderId,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItem>, RepositoryError> {
        let sql = format!(
            "INSERT INTO order_items (order_id, product_id, product_name, quantity, \
                 unit_price, total_price) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ITEM_COLUMNS}"
        );

        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, OrderItem>(&sql)
                .bind(order_id)
                .bind(item.product_id)
                .bind(&item.product_name)
                .bind(item.quantity)
                .bind(item.unit_price)
                .bind(item.total_price)
                .fetch_one(self.pool)
                .await?;
            inserted.push(row);
        }

        Ok(inserted)
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(Order::try_from).transpose()
    }

    /// Get an order by its human-facing order number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_number(&self, order_number: &str) -> Result<Option<Order>, RepositoryError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_number = $1");
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(order_number)
            .fetch_optional(self.pool)
            .await?;

        row.map(Order::try_from).transpose()
    }

    /// List the line items of an order in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderItem>, RepositoryError> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id ASC");
        let rows = sqlx::query_as::<_, OrderItem>(&sql)
            .bind(order_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// List orders with filtering, sorting and pagination.
    ///
    /// Returns the matching page plus the total row count for the filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &OrderFilter) -> Result<(Vec<Order>, i64), RepositoryError> {
        let (_, limit, offset) = page_bounds(filter.page, filter.limit);
        let status = filter.status.map(OrderStatus::as_str);
        let payment_status = filter.payment_status.map(PaymentStatus::as_str);

        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE {ORDER_FILTER_WHERE} \
             ORDER BY {} {} LIMIT $6 OFFSET $7",
            filter.sort_by.as_column(),
            filter.sort_order.as_sql(),
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(status)
            .bind(payment_status)
            .bind(&filter.customer_phone)
            .bind(filter.date_from)
            .bind(filter.date_to)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM orders WHERE {ORDER_FILTER_WHERE}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(status)
            .bind(payment_status)
            .bind(&filter.customer_phone)
            .bind(filter.date_from)
            .bind(filter.date_to)
            .fetch_one(self.pool)
            .await?;

        let orders = rows
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((orders, total))
    }

    /// Apply field changes to an order.
    ///
    /// Transition validation happens in the service layer before this call;
    /// the repository persists whatever it is handed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: OrderId,
        changes: &OrderChanges,
    ) -> Result<Order, RepositoryError> {
        let sql = format!(
            "UPDATE orders SET \
                 status = COALESCE($2, status), \
                 payment_status = COALESCE($3, payment_status), \
                 district_id = COALESCE($4, district_id), \
                 delivery_charge = COALESCE($5, delivery_charge), \
                 total_amount = COALESCE($6, total_amount), \
                 customer_name = COALESCE($7, customer_name), \
                 customer_phone = COALESCE($8, customer_phone), \
                 customer_address = COALESCE($9, customer_address), \
                 notes = COALESCE($10, notes), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .bind(changes.status.map(OrderStatus::as_str))
            .bind(changes.payment_status.map(PaymentStatus::as_str))
            .bind(changes.district_id)
            .bind(changes.delivery_charge)
            .bind(changes.total_amount)
            .bind(&changes.customer_name)
            .bind(&changes.customer_phone)
            .bind(&changes.customer_address)
            .bind(&changes.notes)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete an order. Line items are removed by the `ON DELETE CASCADE`
    /// foreign key.
    ///
    /// # Returns
    ///
    /// Returns `true` if the order was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
