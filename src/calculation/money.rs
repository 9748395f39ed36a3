//! Cents rounding and display helpers.
//!
//! Every amount the engine returns is an integer number of cents. Decimal
//! arithmetic is only an intermediate step, and [`round_to_cents`] is the one
//! place where an intermediate amount becomes cents.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Rounds an unrounded cents amount to whole cents, half away from zero.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] when the rounded amount does not
/// fit in an `i64`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_to_cents;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_to_cents(Decimal::new(142855, 1)).unwrap(), 14286);
/// assert_eq!(round_to_cents(Decimal::new(-25, 1)).unwrap(), -3);
/// ```
pub fn round_to_cents(amount: Decimal) -> EngineResult<i64> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("amount {} does not fit in cents", amount),
        })
}

/// Adds two cents amounts.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] when the sum does not fit in an
/// `i64`.
pub fn add_cents(a: i64, b: i64) -> EngineResult<i64> {
    a.checked_add(b)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("{} + {} cents overflows", a, b),
        })
}

/// Formats cents as en-US dollars, e.g. `$1,234.56` or `-$5.00`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::format_dollars;
///
/// assert_eq!(format_dollars(123456), "$1,234.56");
/// assert_eq!(format_dollars(-500), "-$5.00");
/// ```
pub fn format_dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let dollars = (magnitude / 100).to_string();

    let grouped = dollars
        .chars()
        .rev()
        .enumerate()
        .fold(String::new(), |mut acc, (i, digit)| {
            if i > 0 && i % 3 == 0 {
                acc.push(',');
            }
            acc.push(digit);
            acc
        })
        .chars()
        .rev()
        .collect::<String>();

    format!("{}${}.{:02}", sign, grouped, magnitude % 100)
}

/// Formats hours with exactly two decimals.
pub fn format_hours(hours: Decimal) -> String {
    let rounded = hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_cents(Decimal::new(5, 1)).unwrap(), 1);
        assert_eq!(round_to_cents(Decimal::new(49, 2)).unwrap(), 0);
        assert_eq!(round_to_cents(Decimal::new(-5, 1)).unwrap(), -1);
    }

    #[test]
    fn test_round_overflow_is_calculation_error() {
        let too_big = Decimal::from(i64::MAX) * Decimal::from(10);
        assert!(matches!(
            round_to_cents(too_big),
            Err(EngineError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_add_cents_overflow_is_calculation_error() {
        assert_eq!(add_cents(12000, 4250).unwrap(), 16250);
        assert!(matches!(
            add_cents(i64::MAX, 1),
            Err(EngineError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_format_dollars_grouping() {
        assert_eq!(format_dollars(0), "$0.00");
        assert_eq!(format_dollars(7), "$0.07");
        assert_eq!(format_dollars(99999), "$999.99");
        assert_eq!(format_dollars(100000), "$1,000.00");
        assert_eq!(format_dollars(123456789), "$1,234,567.89");
    }

    #[test]
    fn test_format_dollars_negative() {
        assert_eq!(format_dollars(-500), "-$5.00");
        assert_eq!(format_dollars(-123456), "-$1,234.56");
    }

    #[test]
    fn test_format_hours_two_decimals() {
        assert_eq!(format_hours(Decimal::from(40)), "40.00");
        assert_eq!(format_hours(Decimal::new(15, 1)), "1.50");
        assert_eq!(format_hours(Decimal::from(1) / Decimal::from(3)), "0.33");
    }
}
