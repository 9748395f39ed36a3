//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: the inclusive date range a
//! payroll run, proration or allocation is computed over.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar days.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let pay_period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 24).unwrap(),
/// };
///
/// assert!(pay_period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert_eq!(pay_period.days().count(), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period from its bounds.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates every day of the period in order.
    ///
    /// An inverted period yields no days.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end_date = self.end_date;
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_pay_period() -> PayPeriod {
        PayPeriod::new(
            NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
        )
    }

    /// PP-001: contains_date within period
    #[test]
    fn test_contains_date_within_period() {
        let period = create_pay_period();
        let test_date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert!(period.contains_date(test_date));
    }

    /// PP-002: contains_date outside period
    #[test]
    fn test_contains_date_outside_period() {
        let period = create_pay_period();
        let test_date = NaiveDate::from_ymd_opt(2026, 1, 27).unwrap();
        assert!(!period.contains_date(test_date));
    }

    #[test]
    fn test_contains_date_on_bounds() {
        let period = create_pay_period();
        assert!(period.contains_date(period.start_date));
        assert!(period.contains_date(period.end_date));
    }

    #[test]
    fn test_days_iterates_inclusive_range() {
        let period = create_pay_period();
        let days: Vec<NaiveDate> = period.days().collect();
        assert_eq!(days.len(), 14);
        assert_eq!(days.first(), Some(&period.start_date));
        assert_eq!(days.last(), Some(&period.end_date));
    }

    #[test]
    fn test_inverted_period_is_empty() {
        let period = PayPeriod::new(
            NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
        );
        assert_eq!(period.days().count(), 0);
    }

    #[test]
    fn test_deserialize_pay_period() {
        let json = r#"{"start_date": "2026-01-13", "end_date": "2026-01-26"}"#;
        let period: PayPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period, create_pay_period());
    }
}
