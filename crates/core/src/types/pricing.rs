//! Pricing rules shared by the cart and catalog.

use rust_decimal::Decimal;

/// The price a customer actually pays for one unit.
///
/// The sale price applies only when it is present and strictly lower than the
/// regular price; a sale price at or above the regular price is ignored.
#[must_use]
pub fn effective_price(price: Decimal, sale_price: Option<Decimal>) -> Decimal {
    match sale_price {
        Some(sale) if sale < price => sale,
        _ => price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_sale_price_wins_when_lower() {
        assert_eq!(effective_price(d(500), Some(d(450))), d(450));
    }

    #[test]
    fn test_regular_price_when_no_sale() {
        assert_eq!(effective_price(d(300), None), d(300));
    }

    #[test]
    fn test_sale_price_ignored_when_not_lower() {
        assert_eq!(effective_price(d(300), Some(d(300))), d(300));
        assert_eq!(effective_price(d(300), Some(d(350))), d(300));
    }
}
