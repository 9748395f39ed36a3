//! Manual per-job contractor payments.
//!
//! Per-job contractors are not prorated. Each completed job is entered by
//! hand and becomes a single allocation on the day it was paid.

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{CompensationType, DailyLaborAllocation};

/// Validates a manual payment and turns it into an allocation.
///
/// `date` must be a strict ISO `yyyy-MM-dd` string and `amount_cents` must
/// be positive. Both identifiers must be non-empty.
///
/// # Errors
///
/// Returns [`EngineError::InvalidManualPayment`] naming the first field that
/// failed validation. Nothing is produced in that case.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::create_manual_payment;
///
/// let allocation =
///     create_manual_payment("emp_003", "rest_001", "2026-01-15", 25000, Some("Deep clean"))
///         .unwrap();
/// assert_eq!(allocation.allocated_amount_cents, 25000);
/// assert_eq!(allocation.calculation_notes, "Deep clean");
///
/// assert!(create_manual_payment("emp_003", "rest_001", "2026-1-15", 25000, None).is_err());
/// assert!(create_manual_payment("emp_003", "rest_001", "2026-01-15", 0, None).is_err());
/// ```
pub fn create_manual_payment(
    employee_id: &str,
    restaurant_id: &str,
    date: &str,
    amount_cents: i64,
    description: Option<&str>,
) -> EngineResult<DailyLaborAllocation> {
    if employee_id.trim().is_empty() {
        return Err(rejected("employee_id", "must not be empty"));
    }
    if restaurant_id.trim().is_empty() {
        return Err(rejected("restaurant_id", "must not be empty"));
    }
    let date = parse_iso_date(date)?;
    if amount_cents <= 0 {
        warn!(employee_id, amount_cents, "Rejected non-positive manual payment");
        return Err(rejected(
            "amount_cents",
            &format!("must be greater than zero, got {}", amount_cents),
        ));
    }

    let calculation_notes = description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("Per-job payment")
        .to_string();

    Ok(DailyLaborAllocation {
        restaurant_id: restaurant_id.to_string(),
        employee_id: employee_id.to_string(),
        date,
        compensation_type: CompensationType::Contractor,
        allocated_amount_cents: amount_cents,
        calculation_notes,
        source_pay_period_start: None,
        source_pay_period_end: None,
    })
}

fn parse_iso_date(input: &str) -> EngineResult<NaiveDate> {
    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(rejected(
            "date",
            &format!("'{}' is not in yyyy-MM-dd format", input),
        ));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| rejected("date", &format!("'{}' is not a calendar date", input)))
}

fn rejected(field: &str, message: &str) -> EngineError {
    EngineError::InvalidManualPayment {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: EngineError) -> String {
        match err {
            EngineError::InvalidManualPayment { field, .. } => field,
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_valid_payment_becomes_contractor_allocation() {
        let allocation =
            create_manual_payment("emp_003", "rest_001", "2026-01-15", 25000, None).unwrap();

        assert_eq!(allocation.employee_id, "emp_003");
        assert_eq!(allocation.restaurant_id, "rest_001");
        assert_eq!(
            allocation.date,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
        );
        assert_eq!(allocation.compensation_type, CompensationType::Contractor);
        assert_eq!(allocation.allocated_amount_cents, 25000);
        assert_eq!(allocation.calculation_notes, "Per-job payment");
        assert_eq!(allocation.source_pay_period_start, None);
    }

    #[test]
    fn test_blank_description_uses_default_notes() {
        let allocation =
            create_manual_payment("emp_003", "rest_001", "2026-01-15", 100, Some("  ")).unwrap();
        assert_eq!(allocation.calculation_notes, "Per-job payment");
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        for amount in [0, -1, -25000] {
            let err =
                create_manual_payment("emp_003", "rest_001", "2026-01-15", amount, None)
                    .unwrap_err();
            assert_eq!(field_of(err), "amount_cents");
        }
    }

    #[test]
    fn test_malformed_dates_are_rejected() {
        for date in [
            "2026-1-15",
            "15/01/2026",
            "2026-01-15T00:00:00",
            "",
            "2026/01/15",
            "+2026-01-1",
        ] {
            let err = create_manual_payment("emp_003", "rest_001", date, 25000, None).unwrap_err();
            assert_eq!(field_of(err), "date", "{}", date);
        }
    }

    #[test]
    fn test_impossible_calendar_date_is_rejected() {
        let err =
            create_manual_payment("emp_003", "rest_001", "2026-02-30", 25000, None).unwrap_err();
        assert_eq!(field_of(err), "date");
    }

    #[test]
    fn test_empty_identifiers_are_rejected() {
        let err = create_manual_payment("", "rest_001", "2026-01-15", 25000, None).unwrap_err();
        assert_eq!(field_of(err), "employee_id");

        let err = create_manual_payment("emp_003", " ", "2026-01-15", 25000, None).unwrap_err();
        assert_eq!(field_of(err), "restaurant_id");
    }
}
