//! Order placement and update service.
//!
//! This is the only multi-step write path in the system. Placement runs a
//! sequential validate-then-write pipeline against the catalog database:
//! validate input, resolve the district, check stock per line, price the
//! lines from stored prices, persist the order and its items, then decrement
//! stock. There is no transaction around the three writes; see the failure
//! notes on [`OrderService::place_order`].

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use tamarind_core::{DistrictId, OrderId, OrderStatus, ProductId};

use crate::db::orders::{NewOrder, NewOrderItem, OrderChanges};
use crate::db::{DistrictRepository, OrderRepository, ProductRepository, RepositoryError};
use crate::models::{CreateOrderInput, Order, OrderDetail, Product, UpdateOrderInput};

/// Errors from the order pipeline.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Missing or malformed input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The order does not exist.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// The requested delivery district does not exist.
    #[error("district {0} does not exist")]
    InvalidDistrict(DistrictId),

    /// An ordered product does not exist.
    #[error("product {0} does not exist")]
    ProductNotFound(ProductId),

    /// Not enough stock to fulfill a line.
    #[error("insufficient stock for {name}: requested {requested}, available {available}")]
    InsufficientStock {
        name: String,
        requested: i32,
        available: i32,
    },

    /// The requested status change is not in the transition graph.
    #[error("cannot change order status from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Underlying database failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Service for placing and updating orders.
pub struct OrderService<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place a new order.
    ///
    /// Prices always come from the stored product rows, never from the
    /// request, so a tampered client cannot set its own prices. The regular
    /// price is charged even when a sale price is set.
    ///
    /// # Failure semantics
    ///
    /// The order row, its items, and the stock decrements are three separate
    /// writes with no transaction. If inserting items fails, the order row
    /// is deleted so no orphaned order remains. A failed stock decrement is
    /// logged and left for manual reconciliation; the order stands.
    ///
    /// # Errors
    ///
    /// Returns `Validation`, `InvalidDistrict`, `ProductNotFound` or
    /// `InsufficientStock` when the input fails a check, and `Repository`
    /// when a write fails.
    pub async fn place_order(&self, input: &CreateOrderInput) -> Result<OrderDetail, OrderError> {
        validate_input(input)?;

        let districts = DistrictRepository::new(self.pool);
        let district = districts
            .get(input.district_id)
            .await?
            .ok_or(OrderError::InvalidDistrict(input.district_id))?;

        let products = ProductRepository::new(self.pool);
        let mut resolved = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let product = products
                .get(line.product_id)
                .await?
                .ok_or(OrderError::ProductNotFound(line.product_id))?;

            if !product.has_stock_for(line.quantity) {
                return Err(OrderError::InsufficientStock {
                    name: product.name,
                    requested: line.quantity,
                    available: product.stock_quantity,
                });
            }
            resolved.push((product, line.quantity));
        }

        let (items, subtotal) = price_lines(&resolved);
        let total_amount = subtotal + district.delivery_charge;

        let orders = OrderRepository::new(self.pool);
        let order = orders
            .create(&NewOrder {
                order_number: generate_order_number(),
                customer_name: input.customer_name.trim().to_string(),
                customer_phone: input.customer_phone.trim().to_string(),
                customer_address: input.customer_address.trim().to_string(),
                district_id: district.id,
                subtotal,
                delivery_charge: district.delivery_charge,
                total_amount,
                notes: input.notes.clone(),
            })
            .await?;

        let inserted = match orders.insert_items(order.id, &items).await {
            Ok(inserted) => inserted,
            Err(e) => {
                // Compensating delete: drop the order row so no orphaned
                // order remains. Items inserted before the failure go with
                // it via the FK cascade.
                if let Err(cleanup) = orders.delete(order.id).await {
                    tracing::error!(
                        order_id = %order.id,
                        error = %cleanup,
                        "failed to clean up order after item insert failure"
                    );
                }
                return Err(e.into());
            }
        };

        for item in &inserted {
            // A failed decrement leaves the order in place; stock is
            // reconciled manually.
            if let Err(e) = products.decrement_stock(item.product_id, item.quantity).await {
                tracing::warn!(
                    order_id = %order.id,
                    product_id = %item.product_id,
                    quantity = item.quantity,
                    error = %e,
                    "stock decrement failed for placed order"
                );
            }
        }

        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            total = %order.total_amount,
            "order placed"
        );

        Ok(OrderDetail {
            order,
            items: inserted,
            district,
        })
    }

    /// Update an order.
    ///
    /// A status change must follow the transition graph. A district change
    /// recomputes the delivery charge and total from the stored subtotal,
    /// which changes the customer-facing total of an already-placed order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown order, `InvalidTransition` for a
    /// disallowed status change, `InvalidDistrict` for an unknown district,
    /// and `Repository` when a write fails.
    pub async fn update_order(
        &self,
        id: OrderId,
        input: &UpdateOrderInput,
    ) -> Result<OrderDetail, OrderError> {
        let orders = OrderRepository::new(self.pool);
        let existing = orders.get(id).await?.ok_or(OrderError::NotFound(id))?;

        if let Some(next) = input.status
            && next != existing.status
            && !existing.status.can_transition_to(next)
        {
            return Err(OrderError::InvalidTransition {
                from: existing.status,
                to: next,
            });
        }

        let mut changes = OrderChanges {
            status: input.status,
            payment_status: input.payment_status,
            customer_name: input.customer_name.clone(),
            customer_phone: input.customer_phone.clone(),
            customer_address: input.customer_address.clone(),
            notes: input.notes.clone(),
            ..OrderChanges::default()
        };

        if let Some(new_district_id) = input.district_id
            && new_district_id != existing.district_id
        {
            let districts = DistrictRepository::new(self.pool);
            let district = districts
                .get(new_district_id)
                .await?
                .ok_or(OrderError::InvalidDistrict(new_district_id))?;

            changes.district_id = Some(district.id);
            changes.delivery_charge = Some(district.delivery_charge);
            changes.total_amount = Some(existing.subtotal + district.delivery_charge);
        }

        let updated = orders.update(id, &changes).await?;
        self.detail_for(updated).await
    }

    /// Fetch an order by ID, joined with its items and district.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown order and `Repository` when a
    /// query fails.
    pub async fn get_detail(&self, id: OrderId) -> Result<OrderDetail, OrderError> {
        let orders = OrderRepository::new(self.pool);
        let order = orders.get(id).await?.ok_or(OrderError::NotFound(id))?;
        self.detail_for(order).await
    }

    /// Fetch an order by order number, joined with its items and district.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` (as `Repository`) for an unknown
    /// number and `Repository` when a query fails.
    pub async fn get_detail_by_number(
        &self,
        order_number: &str,
    ) -> Result<OrderDetail, OrderError> {
        let orders = OrderRepository::new(self.pool);
        let order = orders
            .get_by_number(order_number)
            .await?
            .ok_or(OrderError::Repository(RepositoryError::NotFound))?;
        self.detail_for(order).await
    }

    /// Join an order with its items and district.
    async fn detail_for(&self, order: Order) -> Result<OrderDetail, OrderError> {
        let items = OrderRepository::new(self.pool)
            .items_for_order(order.id)
            .await?;
        let district = DistrictRepository::new(self.pool)
            .get(order.district_id)
            .await?
            .ok_or_else(|| {
                OrderError::Repository(RepositoryError::DataCorruption(format!(
                    "order {} references missing district {}",
                    order.id, order.district_id
                )))
            })?;

        Ok(OrderDetail {
            order,
            items,
            district,
        })
    }
}

// =============================================================================
// Pure pipeline steps
// =============================================================================

/// Check required fields and the item list before touching the database.
fn validate_input(input: &CreateOrderInput) -> Result<(), OrderError> {
    let required = [
        ("customer_name", &input.customer_name),
        ("customer_phone", &input.customer_phone),
        ("customer_address", &input.customer_address),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(OrderError::Validation(format!("{field} is required")));
        }
    }

    if input.items.is_empty() {
        return Err(OrderError::Validation(
            "order must contain at least one item".to_string(),
        ));
    }
    if input.items.iter().any(|line| line.quantity < 1) {
        return Err(OrderError::Validation(
            "item quantity must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// Price the resolved lines from the stored regular price and return them
/// with the order subtotal.
fn price_lines(resolved: &[(Product, i32)]) -> (Vec<NewOrderItem>, Decimal) {
    let mut subtotal = Decimal::ZERO;
    let items = resolved
        .iter()
        .map(|(product, quantity)| {
            let unit_price = product.price;
            let total_price = unit_price * Decimal::from(*quantity);
            subtotal += total_price;
            NewOrderItem {
                product_id: product.id,
                product_name: product.name.clone(),
                quantity: *quantity,
                unit_price,
                total_price,
            }
        })
        .collect();

    (items, subtotal)
}

/// Generate a human-facing order number, e.g. `TM-20260806-4F2A`.
fn generate_order_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix: u16 = rand::rng().random();
    format!("TM-{date}-{suffix:04X}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tamarind_core::CategoryId;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    use crate::models::OrderLineInput;

    fn product(id: i32, name: &str, price: Decimal, stock: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: None,
            price,
            sale_price: None,
            sku: format!("SKU-{id:03}"),
            stock_quantity: stock,
            category_id: Some(CategoryId::new(1)),
            images: vec![],
            is_active: true,
            is_featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn input(items: Vec<OrderLineInput>) -> CreateOrderInput {
        CreateOrderInput {
            customer_name: "Anika Rahman".to_string(),
            customer_phone: "01711000000".to_string(),
            customer_address: "12 Lake Road, Dhanmondi".to_string(),
            district_id: DistrictId::new(1),
            items,
            notes: None,
        }
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut bad = input(vec![OrderLineInput {
            product_id: ProductId::new(1),
            quantity: 1,
        }]);
        bad.customer_phone = "   ".to_string();

        let err = validate_input(&bad).expect_err("blank phone");
        assert!(matches!(err, OrderError::Validation(msg) if msg.contains("customer_phone")));
    }

    #[test]
    fn test_validate_rejects_empty_item_list() {
        let err = validate_input(&input(vec![])).expect_err("empty items");
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_zero_quantity_line() {
        let err = validate_input(&input(vec![OrderLineInput {
            product_id: ProductId::new(1),
            quantity: 0,
        }]))
        .expect_err("zero quantity");
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn test_validate_accepts_well_formed_input() {
        let ok = input(vec![OrderLineInput {
            product_id: ProductId::new(1),
            quantity: 2,
        }]);
        assert!(validate_input(&ok).is_ok());
    }

    #[test]
    fn test_price_lines_uses_stored_prices() {
        let resolved = vec![
            (product(1, "Clay Teapot", d(500), 10), 2),
            (product(2, "Jute Basket", d(300), 10), 1),
        ];
        let (items, subtotal) = price_lines(&resolved);

        assert_eq!(subtotal, d(1300));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].unit_price, d(500));
        assert_eq!(items[0].total_price, d(1000));
        assert_eq!(items[1].total_price, d(300));
    }

    #[test]
    fn test_total_includes_delivery_charge() {
        let resolved = vec![
            (product(1, "Clay Teapot", d(500), 10), 2),
            (product(2, "Jute Basket", d(300), 10), 1),
        ];
        let (_, subtotal) = price_lines(&resolved);
        let total = subtotal + d(60);
        assert_eq!(total, d(1360));
    }

    #[test]
    fn test_price_lines_ignores_sale_price() {
        // The stored regular price is what gets charged, even while a lower
        // sale price is displayed in the cart.
        let mut discounted = product(3, "Brass Lamp", d(900), 4);
        discounted.sale_price = Some(d(750));

        let (items, subtotal) = price_lines(&[(discounted, 1)]);
        assert_eq!(items[0].unit_price, d(900));
        assert_eq!(subtotal, d(900));
    }

    #[test]
    fn test_stock_check_boundary() {
        let p = product(1, "Clay Teapot", d(500), 2);
        assert!(p.has_stock_for(2));
        assert!(!p.has_stock_for(3));
    }

    #[test]
    fn test_order_number_format() {
        let number = generate_order_number();
        let mut parts = number.split('-');
        assert_eq!(parts.next(), Some("TM"));

        let date = parts.next().expect("date part");
        assert_eq!(date.len(), 8);
        assert!(date.chars().all(|c| c.is_ascii_digit()));

        let suffix = parts.next().expect("suffix part");
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(parts.next(), None);
    }
}
