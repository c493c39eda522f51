use rust_decimal::{Decimal, RoundingStrategy};

/// Render an amount in cents as a decimal string with two fraction digits ("1050" -> "10.50")
pub fn format_cents(cents: i32) -> String {
    Decimal::new(i64::from(cents), 2).to_string()
}

/// Apply a percentage discount, rounding the discount half away from zero
pub fn apply_percentage(cents: i32, percentage: i32) -> i32 {
    let percentage = percentage.clamp(0, 100);
    let price = Decimal::from(cents);
    let discount = (price * Decimal::from(percentage) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let discounted = price - discount;
    discounted.try_into().unwrap_or(cents)
}

/// Subtract a fixed amount, never going below zero
pub fn apply_fixed_amount(cents: i32, amount_cents: i32) -> i32 {
    (cents - amount_cents.max(0)).max(0)
}

/// Gross price of a net amount, `vat_percent` in percentage points
pub fn add_vat(cents: i32, vat_percent: Decimal) -> i32 {
    let price = Decimal::from(cents);
    let vat = (price * vat_percent / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    (price + vat).try_into().unwrap_or(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1050), "10.50");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(7), "0.07");
    }

    #[test]
    fn test_apply_percentage_rounds_discount() {
        assert_eq!(apply_percentage(10_000, 10), 9_000);
        // 15% of 999 = 149.85 -> 150
        assert_eq!(apply_percentage(999, 15), 849);
        assert_eq!(apply_percentage(1_000, 150), 0);
    }

    #[test]
    fn test_apply_fixed_amount_floors_at_zero() {
        assert_eq!(apply_fixed_amount(1_000, 250), 750);
        assert_eq!(apply_fixed_amount(1_000, 5_000), 0);
    }

    #[test]
    fn test_add_vat() {
        assert_eq!(add_vat(1_000, Decimal::new(77, 1)), 1_077);
        assert_eq!(add_vat(999, Decimal::new(22, 0)), 1_219);
        assert_eq!(add_vat(1_000, Decimal::ZERO), 1_000);
    }
}
