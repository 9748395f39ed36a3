//! Spreading periodic pay across calendar days.
//!
//! Salaries and interval-based contractor payments are quoted per pay period.
//! The functions here walk a date range day by day, resolve the terms in
//! effect on each day, and accumulate the unrounded daily amounts. Rounding
//! happens once, at the end, so a range is never off by more than a cent.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompensationTerms, CompensationType, DailyLaborAllocation, Employee, PayPeriod, PayPeriodType,
};

use super::compensation::{
    contractor_daily_amount, resolve_compensation_for_date, salary_daily_amount,
};
use super::hours_aggregator::HoursSummary;
use super::money::{format_dollars, format_hours, round_to_cents};

/// Salary earned over the inclusive range `[start, end]`, in cents.
///
/// Days outside the employee's employment window and days on which the
/// employee was not salaried contribute nothing. Earned pay is computed
/// whether or not the salary is allocated daily.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_salary_for_period;
/// use payroll_engine::config::EngineConfig;
/// use payroll_engine::models::{CompensationTerms, Employee, PayPeriodType};
/// use chrono::NaiveDate;
///
/// let employee = Employee {
///     id: "emp_002".to_string(),
///     name: "Grace".to_string(),
///     position: "Manager".to_string(),
///     compensation: CompensationTerms::Salary {
///         salary_amount_cents: 100000,
///         pay_period_type: PayPeriodType::Weekly,
///     },
///     allocate_daily: true,
///     hire_date: None,
///     termination_date: None,
///     compensation_history: vec![],
/// };
///
/// let cents = calculate_salary_for_period(
///     &employee,
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
///     &EngineConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(cents, 42857);
/// ```
pub fn calculate_salary_for_period(
    employee: &Employee,
    start: NaiveDate,
    end: NaiveDate,
    config: &EngineConfig,
) -> EngineResult<i64> {
    prorate(employee, start, end, |terms| match terms {
        CompensationTerms::Salary {
            salary_amount_cents,
            pay_period_type,
        } => salary_daily_amount(salary_amount_cents, pay_period_type, config),
        _ => Decimal::ZERO,
    })
}

/// Contractor pay earned over the inclusive range `[start, end]`, in cents.
///
/// Per-job contractors earn nothing here; their work is recorded as manual
/// payments.
pub fn calculate_contractor_pay_for_period(
    employee: &Employee,
    start: NaiveDate,
    end: NaiveDate,
    config: &EngineConfig,
) -> EngineResult<i64> {
    prorate(employee, start, end, |terms| match terms {
        CompensationTerms::Contractor {
            payment_amount_cents,
            payment_interval,
        } => contractor_daily_amount(payment_amount_cents, payment_interval, config),
        _ => Decimal::ZERO,
    })
}

fn prorate(
    employee: &Employee,
    start: NaiveDate,
    end: NaiveDate,
    daily_amount: impl Fn(CompensationTerms) -> Decimal,
) -> EngineResult<i64> {
    let total = PayPeriod::new(start, end)
        .days()
        .filter(|day| employee.is_employed_on(*day))
        .try_fold(Decimal::ZERO, |total, day| {
            let snapshot = resolve_compensation_for_date(employee, day)?;
            Ok::<_, EngineError>(total + daily_amount(snapshot.terms))
        })?;

    let cents = round_to_cents(total)?;
    debug!(
        employee_id = %employee.id,
        %start,
        %end,
        cents,
        "Prorated period pay"
    );
    Ok(cents)
}

/// Derives an hourly rate from a salary, in cents.
///
/// `salary × periods_per_year / (hours_per_week × 52)`, rounded to whole
/// cents.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEffectiveRateQuery`] when `hours_per_week`
/// is not positive.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_effective_hourly_rate;
/// use payroll_engine::models::PayPeriodType;
/// use rust_decimal::Decimal;
///
/// let rate = calculate_effective_hourly_rate(100000, PayPeriodType::BiWeekly, Decimal::from(40))
///     .unwrap();
/// assert_eq!(rate, 1250);
/// ```
pub fn calculate_effective_hourly_rate(
    salary_cents: i64,
    pay_period_type: PayPeriodType,
    hours_per_week: Decimal,
) -> EngineResult<i64> {
    if hours_per_week <= Decimal::ZERO {
        return Err(EngineError::InvalidEffectiveRateQuery {
            message: format!("hours per week must be positive, got {}", hours_per_week),
        });
    }

    let annual = Decimal::from(salary_cents) * Decimal::from(pay_period_type.periods_per_year());
    let annual_hours = hours_per_week * Decimal::from(52);
    round_to_cents(annual / annual_hours)
}

/// Effective hourly rate for the terms, in cents, at the configured
/// `standard_hours_per_week`.
///
/// Hourly terms return their own rate. Salaries are converted with
/// [`calculate_effective_hourly_rate`]. Contractors have no hourly rate and
/// return zero.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEffectiveRateQuery`] when the configured
/// weekly hours are not positive.
pub fn effective_hourly_rate(
    terms: CompensationTerms,
    config: &EngineConfig,
) -> EngineResult<i64> {
    match terms {
        CompensationTerms::Hourly { hourly_rate_cents } => Ok(hourly_rate_cents),
        CompensationTerms::Salary {
            salary_amount_cents,
            pay_period_type,
        } => calculate_effective_hourly_rate(
            salary_amount_cents,
            pay_period_type,
            config.standard_hours_per_week,
        ),
        CompensationTerms::Contractor { .. } => Ok(0),
    }
}

/// Generates one labor allocation per employed day in `[start, end]`.
///
/// Each day uses the compensation in effect on that day. Hourly days are
/// costed from the day's entry in `hours` (zero when nothing was worked); salaried and
/// contract days are the daily share of the period or interval amount and
/// record the range they were generated for.
pub fn generate_daily_allocations(
    employee: &Employee,
    restaurant_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    hours: &HoursSummary,
    config: &EngineConfig,
) -> EngineResult<Vec<DailyLaborAllocation>> {
    let allocations = PayPeriod::new(start, end)
        .days()
        .filter(|day| employee.is_employed_on(*day))
        .map(|day| -> EngineResult<DailyLaborAllocation> {
            let snapshot = resolve_compensation_for_date(employee, day)?;
            let (amount, notes) =
                allocation_amount(employee, snapshot.terms, hours.hours_on(day), config);
            let source = match snapshot.terms.compensation_type() {
                CompensationType::Hourly => None,
                _ => Some((start, end)),
            };

            Ok(DailyLaborAllocation {
                restaurant_id: restaurant_id.to_string(),
                employee_id: employee.id.clone(),
                date: day,
                compensation_type: snapshot.terms.compensation_type(),
                allocated_amount_cents: round_to_cents(amount)?,
                calculation_notes: notes,
                source_pay_period_start: source.map(|(s, _)| s),
                source_pay_period_end: source.map(|(_, e)| e),
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    debug!(
        employee_id = %employee.id,
        restaurant_id,
        days = allocations.len(),
        "Generated daily allocations"
    );
    Ok(allocations)
}

fn allocation_amount(
    employee: &Employee,
    terms: CompensationTerms,
    hours: Decimal,
    config: &EngineConfig,
) -> (Decimal, String) {
    match terms {
        CompensationTerms::Hourly { hourly_rate_cents } => (
            Decimal::from(hourly_rate_cents) * hours,
            format!(
                "{} hours @ {}/hr",
                format_hours(hours),
                format_dollars(hourly_rate_cents)
            ),
        ),
        CompensationTerms::Salary { .. } if !employee.allocate_daily => (
            Decimal::ZERO,
            "Salary not allocated daily".to_string(),
        ),
        CompensationTerms::Salary {
            salary_amount_cents,
            pay_period_type,
        } => (
            salary_daily_amount(salary_amount_cents, pay_period_type, config),
            format!(
                "{} {} salary / {} days",
                format_dollars(salary_amount_cents),
                pay_period_type,
                config.pay_period_days.days_for(pay_period_type).normalize()
            ),
        ),
        CompensationTerms::Contractor {
            payment_amount_cents,
            payment_interval,
        } => match config.contractor_interval_days.days_for(payment_interval) {
            Some(days) => (
                contractor_daily_amount(payment_amount_cents, payment_interval, config),
                format!(
                    "{} {} contract / {} days",
                    format_dollars(payment_amount_cents),
                    payment_interval,
                    days.normalize()
                ),
            ),
            None => (
                Decimal::ZERO,
                "Per-job contractor; paid through manual payments".to_string(),
            ),
        },
    }
}
