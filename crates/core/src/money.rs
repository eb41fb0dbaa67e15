//! # Money Module
//!
//! Prices and totals are `rust_decimal::Decimal` in the domain and integer
//! cents in storage, so SQL aggregates stay exact.

use crate::error::{CoreError, CoreResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Number of decimal places carried by every amount
pub const SCALE: u32 = 2;

/// Convert an amount to integer cents.
///
/// Rejects amounts with more than two decimal places instead of rounding
/// them silently.
///
/// # Examples
/// ```
/// use ticketdesk_core::money::to_cents;
/// use rust_decimal::Decimal;
///
/// assert_eq!(to_cents(Decimal::new(2050, 2)).unwrap(), 2050);
/// ```
pub fn to_cents(amount: Decimal) -> CoreResult<i64> {
    let normalized = amount.normalize();
    if normalized.scale() > SCALE {
        return Err(CoreError::TooPrecise(amount));
    }
    normalized
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or(CoreError::AmountOutOfRange(amount))
}

/// Convert integer cents back into a two-decimal amount
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, SCALE)
}

/// Divide two amounts, rounding to two decimals; zero when the divisor is zero
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO.round_dp(SCALE);
    }
    (numerator / denominator).round_dp(SCALE)
}

/// Render an amount with exactly two decimals (`60` -> `"60.00"`)
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(dec!(20.00)).unwrap(), 2000);
        assert_eq!(to_cents(dec!(0)).unwrap(), 0);
        assert_eq!(to_cents(dec!(19.9)).unwrap(), 1990);
        // Trailing zeros beyond two places are fine
        assert_eq!(to_cents(dec!(5.2500)).unwrap(), 525);
    }

    #[test]
    fn test_to_cents_rejects_sub_cent() {
        assert_eq!(to_cents(dec!(1.005)), Err(CoreError::TooPrecise(dec!(1.005))));
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(from_cents(6000), dec!(60.00));
        assert_eq!(from_cents(1), dec!(0.01));
    }

    #[test]
    fn test_ratio_zero_divisor() {
        assert_eq!(ratio(dec!(100), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(ratio(dec!(100), dec!(3)), dec!(33.33));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(60)), "60.00");
        assert_eq!(format_amount(dec!(12.5)), "12.50");
    }
}
