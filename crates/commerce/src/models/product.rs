//! Product domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tamarind_core::{CategoryId, ProductId, effective_price};

use super::list::SortOrder;

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL-safe unique slug.
    pub slug: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Regular unit price.
    pub price: Decimal,
    /// Optional discounted price; applies only when lower than `price`.
    pub sale_price: Option<Decimal>,
    /// Stock-keeping unit, unique across the catalog.
    pub sku: String,
    /// Units currently in stock. Never negative.
    pub stock_quantity: i32,
    /// Owning category, if any.
    pub category_id: Option<CategoryId>,
    /// Public image URLs, in display order.
    pub images: Vec<String>,
    /// Whether the product is visible on the storefront.
    pub is_active: bool,
    /// Whether the product is featured on the home page.
    pub is_featured: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The price a customer pays for one unit, sale-aware.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        effective_price(self.price, self.sale_price)
    }

    /// Whether the requested quantity can be fulfilled from stock.
    #[must_use]
    pub const fn has_stock_for(&self, quantity: i32) -> bool {
        self.stock_quantity >= quantity
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub sku: String,
    #[serde(default)]
    pub stock_quantity: i32,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

/// Input for updating a product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub sku: Option<String>,
    pub stock_quantity: Option<i32>,
    pub category_id: Option<CategoryId>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Sortable columns for product lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortKey {
    #[default]
    CreatedAt,
    Name,
    Price,
    StockQuantity,
}

impl ProductSortKey {
    /// Parse a `sort_by` query parameter; unknown values fall back to
    /// creation time.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "name" => Self::Name,
            "price" => Self::Price,
            "stock_quantity" => Self::StockQuantity,
            _ => Self::CreatedAt,
        }
    }

    /// The column this key sorts on.
    #[must_use]
    pub const fn as_column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Name => "name",
            Self::Price => "price",
            Self::StockQuantity => "stock_quantity",
        }
    }
}

/// Filter criteria for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Filter by owning category.
    pub category_id: Option<CategoryId>,
    /// Filter by visibility.
    pub is_active: Option<bool>,
    /// Filter by featured flag.
    pub is_featured: Option<bool>,
    /// Case-insensitive substring match over name and SKU.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size.
    pub limit: Option<i64>,
    /// Sort column.
    pub sort_by: ProductSortKey,
    /// Sort direction.
    pub sort_order: SortOrder,
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn product(price: Decimal, sale_price: Option<Decimal>, stock: i32) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Ceylon Tea".to_string(),
            slug: "ceylon-tea".to_string(),
            description: None,
            price,
            sale_price,
            sku: "TEA-001".to_string(),
            stock_quantity: stock,
            category_id: None,
            images: vec![],
            is_active: true,
            is_featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_price_prefers_lower_sale() {
        assert_eq!(
            product(d(500), Some(d(420)), 5).effective_price(),
            d(420)
        );
        assert_eq!(product(d(500), None, 5).effective_price(), d(500));
        assert_eq!(
            product(d(500), Some(d(600)), 5).effective_price(),
            d(500)
        );
    }

    #[test]
    fn test_has_stock_for() {
        let p = product(d(100), None, 2);
        assert!(p.has_stock_for(2));
        assert!(!p.has_stock_for(3));
        assert!(p.has_stock_for(0));
    }

    #[test]
    fn test_sort_key_param_fallback() {
        assert_eq!(ProductSortKey::from_param("price"), ProductSortKey::Price);
        assert_eq!(
            ProductSortKey::from_param("bogus"),
            ProductSortKey::CreatedAt
        );
    }
}
