//! Compensation resolution and daily labor cost.
//!
//! An employee's pay terms can change over time. [`resolve_compensation_for_date`]
//! finds the terms in effect on a given day, and [`daily_cost`] turns those
//! terms into the labor cost of that one day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompensationHistoryEntry, CompensationTerms, CompensationType, ContractorInterval, Employee,
    PayPeriodType,
};

use super::money::round_to_cents;

/// The pay terms in effect for an employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationSnapshot {
    /// The employee the snapshot belongs to.
    pub employee_id: String,
    /// The resolved terms.
    pub terms: CompensationTerms,
    /// Effective date of the history entry used, or `None` when the
    /// employee's current terms applied.
    pub effective_date: Option<NaiveDate>,
}

/// Resolves the compensation in effect for `employee` on `date`.
///
/// The latest history entry with `effective_date <= date` wins; when several
/// entries share that date the last one listed wins. Fields the entry leaves
/// out (pay period, contractor interval) are taken from the employee's
/// current terms when those are of the same type. With no qualifying entry
/// the current terms apply unchanged.
///
/// # Errors
///
/// Returns [`EngineError::MissingCompensationField`] when a salary or
/// contractor entry lacks its period or interval and the current terms cannot
/// supply it.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_compensation_for_date;
/// use payroll_engine::models::{
///     CompensationHistoryEntry, CompensationTerms, CompensationType, Employee,
/// };
/// use chrono::NaiveDate;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Ada".to_string(),
///     position: "Cook".to_string(),
///     compensation: CompensationTerms::Hourly { hourly_rate_cents: 1800 },
///     allocate_daily: true,
///     hire_date: None,
///     termination_date: None,
///     compensation_history: vec![CompensationHistoryEntry {
///         effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///         compensation_type: CompensationType::Hourly,
///         amount_cents: 1500,
///         pay_period_type: None,
///         contractor_interval: None,
///     }],
/// };
///
/// let snapshot =
///     resolve_compensation_for_date(&employee, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
///         .unwrap();
/// assert_eq!(snapshot.terms.hourly_rate_cents(), Some(1500));
/// ```
pub fn resolve_compensation_for_date(
    employee: &Employee,
    date: NaiveDate,
) -> EngineResult<CompensationSnapshot> {
    let entry = employee
        .compensation_history
        .iter()
        .filter(|entry| entry.effective_date <= date)
        .max_by_key(|entry| entry.effective_date);

    let Some(entry) = entry else {
        return Ok(CompensationSnapshot {
            employee_id: employee.id.clone(),
            terms: employee.compensation,
            effective_date: None,
        });
    };

    let terms = terms_from_entry(employee, entry, date)?;
    debug!(
        employee_id = %employee.id,
        %date,
        effective_date = %entry.effective_date,
        compensation_type = %entry.compensation_type,
        "Resolved compensation from history"
    );

    Ok(CompensationSnapshot {
        employee_id: employee.id.clone(),
        terms,
        effective_date: Some(entry.effective_date),
    })
}

fn terms_from_entry(
    employee: &Employee,
    entry: &CompensationHistoryEntry,
    date: NaiveDate,
) -> EngineResult<CompensationTerms> {
    let missing = |field: &str| EngineError::MissingCompensationField {
        employee_id: employee.id.clone(),
        field: field.to_string(),
        date,
    };

    match entry.compensation_type {
        CompensationType::Hourly => Ok(CompensationTerms::Hourly {
            hourly_rate_cents: entry.amount_cents,
        }),
        CompensationType::Salary => {
            let current = match employee.compensation {
                CompensationTerms::Salary {
                    pay_period_type, ..
                } => Some(pay_period_type),
                _ => None,
            };
            let pay_period_type = entry
                .pay_period_type
                .or(current)
                .ok_or_else(|| missing("pay_period_type"))?;
            Ok(CompensationTerms::Salary {
                salary_amount_cents: entry.amount_cents,
                pay_period_type,
            })
        }
        CompensationType::Contractor => {
            let current = match employee.compensation {
                CompensationTerms::Contractor {
                    payment_interval, ..
                } => Some(payment_interval),
                _ => None,
            };
            let payment_interval = entry
                .contractor_interval
                .or(current)
                .ok_or_else(|| missing("contractor_interval"))?;
            Ok(CompensationTerms::Contractor {
                payment_amount_cents: entry.amount_cents,
                payment_interval,
            })
        }
    }
}

/// Unrounded daily share of a salary, in cents.
pub fn salary_daily_amount(
    salary_amount_cents: i64,
    pay_period_type: PayPeriodType,
    config: &EngineConfig,
) -> Decimal {
    Decimal::from(salary_amount_cents) / config.pay_period_days.days_for(pay_period_type)
}

/// Unrounded daily share of a contractor payment, in cents.
///
/// Per-job contractors have no daily share.
pub fn contractor_daily_amount(
    payment_amount_cents: i64,
    payment_interval: ContractorInterval,
    config: &EngineConfig,
) -> Decimal {
    config
        .contractor_interval_days
        .days_for(payment_interval)
        .map(|days| Decimal::from(payment_amount_cents) / days)
        .unwrap_or(Decimal::ZERO)
}

/// Unrounded labor cost of one day under `snapshot`, in cents.
///
/// - Hourly: rate times `hours_worked`.
/// - Salary: the salary spread over the days of its pay period, or zero
///   when the employee's salary is not allocated daily.
/// - Contractor: the payment spread over the days of its interval, or zero
///   for per-job work.
///
/// # Errors
///
/// Returns [`EngineError::MissingHoursWorked`] for hourly terms without
/// `hours_worked`.
pub fn daily_cost(
    snapshot: &CompensationSnapshot,
    allocate_daily: bool,
    hours_worked: Option<Decimal>,
    config: &EngineConfig,
) -> EngineResult<Decimal> {
    match snapshot.terms {
        CompensationTerms::Hourly { hourly_rate_cents } => {
            let hours = hours_worked.ok_or_else(|| EngineError::MissingHoursWorked {
                employee_id: snapshot.employee_id.clone(),
            })?;
            Ok(Decimal::from(hourly_rate_cents) * hours)
        }
        CompensationTerms::Salary { .. } if !allocate_daily => Ok(Decimal::ZERO),
        CompensationTerms::Salary {
            salary_amount_cents,
            pay_period_type,
        } => Ok(salary_daily_amount(
            salary_amount_cents,
            pay_period_type,
            config,
        )),
        CompensationTerms::Contractor {
            payment_amount_cents,
            payment_interval,
        } => Ok(contractor_daily_amount(
            payment_amount_cents,
            payment_interval,
            config,
        )),
    }
}

/// [`daily_cost`] rounded to whole cents.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{calculate_daily_cost, CompensationSnapshot};
/// use payroll_engine::config::EngineConfig;
/// use payroll_engine::models::{CompensationTerms, PayPeriodType};
///
/// let snapshot = CompensationSnapshot {
///     employee_id: "emp_002".to_string(),
///     terms: CompensationTerms::Salary {
///         salary_amount_cents: 100000,
///         pay_period_type: PayPeriodType::Weekly,
///     },
///     effective_date: None,
/// };
///
/// let cents = calculate_daily_cost(&snapshot, true, None, &EngineConfig::default()).unwrap();
/// assert_eq!(cents, 14286);
/// ```
pub fn calculate_daily_cost(
    snapshot: &CompensationSnapshot,
    allocate_daily: bool,
    hours_worked: Option<Decimal>,
    config: &EngineConfig,
) -> EngineResult<i64> {
    round_to_cents(daily_cost(snapshot, allocate_daily, hours_worked, config)?)
}
