//! Daily labor allocation model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CompensationType;

/// Labor cost attributed to one employee on one calendar day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CompensationType, DailyLaborAllocation};
/// use chrono::NaiveDate;
///
/// let allocation = DailyLaborAllocation {
///     restaurant_id: "rest_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     compensation_type: CompensationType::Salary,
///     allocated_amount_cents: 14286,
///     calculation_notes: "$1,000.00 weekly salary / 7 days".to_string(),
///     source_pay_period_start: None,
///     source_pay_period_end: None,
/// };
/// assert_eq!(allocation.allocated_amount_cents, 14286);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLaborAllocation {
    /// The restaurant the cost belongs to.
    pub restaurant_id: String,
    /// The employee the cost belongs to.
    pub employee_id: String,
    /// The calendar day the cost is attributed to.
    pub date: NaiveDate,
    /// The kind of pay that produced the cost.
    pub compensation_type: CompensationType,
    /// The cost in cents.
    pub allocated_amount_cents: i64,
    /// How the amount was derived.
    pub calculation_notes: String,
    /// Start of the range the allocation was generated for.
    #[serde(default)]
    pub source_pay_period_start: Option<NaiveDate>,
    /// End of the range the allocation was generated for.
    #[serde(default)]
    pub source_pay_period_end: Option<NaiveDate>,
}
