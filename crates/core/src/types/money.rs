//! Money helpers.
//!
//! Amounts are plain [`Decimal`] values in US dollars. The store keeps them
//! as JSON numbers, so anything computed is rounded to cents before it is
//! persisted.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to whole cents, halves away from zero.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display, e.g. `$316.25`.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", round_cents(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents_midpoint() {
        assert_eq!(round_cents(Decimal::new(10_005, 3)), Decimal::new(1001, 2));
        assert_eq!(round_cents(Decimal::new(-10_005, 3)), Decimal::new(-1001, 2));
        assert_eq!(round_cents(Decimal::new(31_625, 2)), Decimal::new(31_625, 2));
    }

    #[test]
    fn test_format_usd_pads_cents() {
        assert_eq!(format_usd(Decimal::new(5, 0)), "$5.00");
        assert_eq!(format_usd(Decimal::new(31_625, 2)), "$316.25");
    }
}
