//! Payroll period assembly.
//!
//! Runs the full pipeline for each employee (normalize, reconstruct, filter
//! to the period, aggregate, price) and rolls the rows up into a
//! [`PayrollPeriod`]. A failure for one employee is recorded on the period
//! and never stops the others.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    CompensationTerms, Employee, EmployeePayroll, IncompleteShift, PayPeriod, PayrollError,
    PayrollPeriod, Punch,
};

use super::compensation::resolve_compensation_for_date;
use super::hours_aggregator::{aggregate_hours, sessions_in_range};
use super::money::{add_cents, round_to_cents};
use super::proration::{
    calculate_contractor_pay_for_period, calculate_salary_for_period, effective_hourly_rate,
};
use super::punch_normalizer::{normalize_punches, partition_by_employee};
use super::session_reconstructor::reconstruct_sessions;

/// Computes one employee's payroll row for `period`.
///
/// Only `punches` belonging to `employee` are used. The compensation type
/// and hourly rate are those in effect on the last day of the period.
///
/// - Hourly: regular hours at the rate, overtime hours at the rate times the
///   overtime multiplier.
/// - Salary and contractor: the prorated period amount as regular pay, no
///   overtime pay and a zero hourly rate.
///
/// `effective_hourly_rate_cents` is the hourly equivalent of the terms at the
/// configured `standard_hours_per_week`.
///
/// Sessions with anomalies are listed in `incomplete_shifts` and do not
/// block the row.
///
/// # Errors
///
/// Propagates compensation resolution failures and
/// [`crate::error::EngineError::CalculationError`] when an amount, including
/// gross pay plus tips, overflows.
pub fn calculate_employee_payroll(
    employee: &Employee,
    punches: &[Punch],
    tips_cents: i64,
    period: &PayPeriod,
    config: &EngineConfig,
) -> EngineResult<EmployeePayroll> {
    let own_punches: Vec<Punch> = punches
        .iter()
        .filter(|p| p.employee_id == employee.id)
        .cloned()
        .collect();

    let processed = normalize_punches(&own_punches, config);
    let sessions = reconstruct_sessions(&processed, config);
    let in_period = sessions_in_range(&sessions, period);
    let hours = aggregate_hours(&in_period, config);

    let incomplete_shifts: Vec<IncompleteShift> = in_period
        .iter()
        .filter(|s| s.has_anomalies)
        .map(IncompleteShift::from)
        .collect();

    let snapshot = resolve_compensation_for_date(employee, period.end_date)?;
    let (hourly_rate_cents, regular_pay_cents, overtime_pay_cents) = match snapshot.terms {
        CompensationTerms::Hourly { hourly_rate_cents } => {
            let rate = Decimal::from(hourly_rate_cents);
            (
                hourly_rate_cents,
                round_to_cents(hours.regular_hours * rate)?,
                round_to_cents(hours.overtime_hours * rate * config.overtime_multiplier)?,
            )
        }
        CompensationTerms::Salary { .. } => (
            0,
            calculate_salary_for_period(employee, period.start_date, period.end_date, config)?,
            0,
        ),
        CompensationTerms::Contractor { .. } => (
            0,
            calculate_contractor_pay_for_period(
                employee,
                period.start_date,
                period.end_date,
                config,
            )?,
            0,
        ),
    };

    let gross_pay_cents = add_cents(regular_pay_cents, overtime_pay_cents)?;
    let total_pay_cents = add_cents(gross_pay_cents, tips_cents)?;
    let effective_hourly_rate_cents = effective_hourly_rate(snapshot.terms, config)?;

    debug!(
        employee_id = %employee.id,
        sessions = in_period.len(),
        incomplete = incomplete_shifts.len(),
        regular_hours = %hours.regular_hours,
        overtime_hours = %hours.overtime_hours,
        gross_pay_cents,
        "Calculated employee payroll"
    );

    Ok(EmployeePayroll {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        position: employee.position.clone(),
        compensation_type: snapshot.terms.compensation_type(),
        hourly_rate_cents,
        effective_hourly_rate_cents,
        regular_hours: hours.regular_hours,
        overtime_hours: hours.overtime_hours,
        total_hours: hours.regular_hours + hours.overtime_hours,
        regular_pay_cents,
        overtime_pay_cents,
        gross_pay_cents,
        tips_cents,
        total_pay_cents,
        incomplete_shifts,
    })
}

/// Computes payroll for every employee over `[start, end]`.
///
/// Punches may arrive in any order and for any mix of employees. Employees
/// not employed during the period and without punches are skipped. Tips are
/// looked up by employee id and default to zero.
pub fn assemble_payroll_period(
    restaurant_id: &str,
    period: &PayPeriod,
    employees: &[Employee],
    punches: &[Punch],
    tips: &HashMap<String, i64>,
    config: &EngineConfig,
) -> PayrollPeriod {
    let punches_by_employee = partition_by_employee(punches);

    for employee_id in punches_by_employee.keys() {
        if !employees.iter().any(|e| &e.id == employee_id) {
            warn!(%employee_id, "Ignoring punches for unknown employee");
        }
    }

    let (rows, errors, totals) = employees.iter().fold(
        (Vec::new(), Vec::new(), PeriodTotals::default()),
        |(mut rows, mut errors, totals), employee| {
            let own_punches = punches_by_employee
                .get(&employee.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            if own_punches.is_empty()
                && !employee.is_employed_during(period.start_date, period.end_date)
            {
                debug!(employee_id = %employee.id, "Skipping employee outside the period");
                return (rows, errors, totals);
            }

            let tips_cents = tips.get(&employee.id).copied().unwrap_or(0);
            let outcome =
                calculate_employee_payroll(employee, own_punches, tips_cents, period, config)
                    .and_then(|row| totals.with(&row).map(|next| (row, next)));

            match outcome {
                Ok((row, next)) => {
                    rows.push(row);
                    (rows, errors, next)
                }
                Err(err) => {
                    error!(employee_id = %employee.id, error = %err, "Payroll failed for employee");
                    errors.push(PayrollError {
                        employee_id: employee.id.clone(),
                        message: err.to_string(),
                    });
                    (rows, errors, totals)
                }
            }
        },
    );

    let payroll = summarize(restaurant_id, period, rows, errors, totals);
    info!(
        restaurant_id,
        start_date = %payroll.start_date,
        end_date = %payroll.end_date,
        employees = payroll.employees.len(),
        errors = payroll.errors.len(),
        total_pay_cents = payroll.total_pay_cents,
        "Assembled payroll period"
    );
    payroll
}

/// Running period totals. A row is only added when every sum still fits.
#[derive(Default)]
struct PeriodTotals {
    regular_hours: Decimal,
    overtime_hours: Decimal,
    regular_pay_cents: i64,
    overtime_pay_cents: i64,
    gross_pay_cents: i64,
    tips_cents: i64,
    total_pay_cents: i64,
}

impl PeriodTotals {
    fn with(&self, row: &EmployeePayroll) -> EngineResult<Self> {
        Ok(Self {
            regular_hours: self.regular_hours + row.regular_hours,
            overtime_hours: self.overtime_hours + row.overtime_hours,
            regular_pay_cents: add_cents(self.regular_pay_cents, row.regular_pay_cents)?,
            overtime_pay_cents: add_cents(self.overtime_pay_cents, row.overtime_pay_cents)?,
            gross_pay_cents: add_cents(self.gross_pay_cents, row.gross_pay_cents)?,
            tips_cents: add_cents(self.tips_cents, row.tips_cents)?,
            total_pay_cents: add_cents(self.total_pay_cents, row.total_pay_cents)?,
        })
    }
}

fn summarize(
    restaurant_id: &str,
    period: &PayPeriod,
    employees: Vec<EmployeePayroll>,
    errors: Vec<PayrollError>,
    totals: PeriodTotals,
) -> PayrollPeriod {
    PayrollPeriod {
        restaurant_id: restaurant_id.to_string(),
        start_date: period.start_date,
        end_date: period.end_date,
        employees,
        total_regular_hours: totals.regular_hours,
        total_overtime_hours: totals.overtime_hours,
        total_regular_pay_cents: totals.regular_pay_cents,
        total_overtime_pay_cents: totals.overtime_pay_cents,
        total_gross_pay_cents: totals.gross_pay_cents,
        total_tips_cents: totals.tips_cents,
        total_pay_cents: totals.total_pay_cents,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{
        AnomalyCode, CompensationHistoryEntry, CompensationType, PayPeriodType, PunchType,
    };
    use chrono::{NaiveDate, NaiveDateTime};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn punch(id: &str, employee_id: &str, punch_type: PunchType, ts: &str) -> Punch {
        Punch {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            punch_type,
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
        }
    }

    fn hourly(id: &str, rate: i64) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {}", id),
            position: "Server".to_string(),
            compensation: CompensationTerms::Hourly {
                hourly_rate_cents: rate,
            },
            allocate_daily: true,
            hire_date: None,
            termination_date: None,
            compensation_history: vec![],
        }
    }

    fn shift(employee_id: &str, day: &str, hours: u32) -> Vec<Punch> {
        let clock_out = format!("{} {:02}:00:00", day, 8 + hours);
        vec![
            punch(
                &format!("{}-{}-in", employee_id, day),
                employee_id,
                PunchType::ClockIn,
                &format!("{} 08:00:00", day),
            ),
            punch(
                &format!("{}-{}-out", employee_id, day),
                employee_id,
                PunchType::ClockOut,
                &clock_out,
            ),
        ]
    }

    fn five_nine_hour_days(employee_id: &str) -> Vec<Punch> {
        [
            "2026-01-12",
            "2026-01-13",
            "2026-01-14",
            "2026-01-15",
            "2026-01-16",
        ]
        .iter()
        .flat_map(|day| shift(employee_id, day, 9))
        .collect()
    }

    fn week_period() -> PayPeriod {
        PayPeriod::new(date("2026-01-11"), date("2026-01-17"))
    }

    // 45 hours in one week at 1500 cents
    #[test]
    fn test_hourly_overtime_payroll() {
        let employee = hourly("emp_001", 1500);
        let punches = five_nine_hour_days("emp_001");

        let row = calculate_employee_payroll(
            &employee,
            &punches,
            0,
            &week_period(),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(row.regular_hours, Decimal::from(40));
        assert_eq!(row.overtime_hours, Decimal::from(5));
        assert_eq!(row.total_hours, Decimal::from(45));
        assert_eq!(row.regular_pay_cents, 60000);
        assert_eq!(row.overtime_pay_cents, 11250);
        assert_eq!(row.gross_pay_cents, 71250);
        assert_eq!(row.hourly_rate_cents, 1500);
        assert_eq!(row.effective_hourly_rate_cents, 1500);
        assert!(row.incomplete_shifts.is_empty());
    }

    #[test]
    fn test_tips_are_added_to_total() {
        let employee = hourly("emp_001", 1500);
        let punches = shift("emp_001", "2026-01-12", 8);

        let row = calculate_employee_payroll(
            &employee,
            &punches,
            4250,
            &week_period(),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(row.gross_pay_cents, 12000);
        assert_eq!(row.tips_cents, 4250);
        assert_eq!(row.total_pay_cents, 16250);
    }

    #[test]
    fn test_rate_resolved_as_of_period_end() {
        let mut employee = hourly("emp_001", 2000);
        employee.compensation_history = vec![
            CompensationHistoryEntry {
                effective_date: date("2025-01-01"),
                compensation_type: CompensationType::Hourly,
                amount_cents: 1500,
                pay_period_type: None,
                contractor_interval: None,
            },
            CompensationHistoryEntry {
                effective_date: date("2026-01-15"),
                compensation_type: CompensationType::Hourly,
                amount_cents: 1800,
                pay_period_type: None,
                contractor_interval: None,
            },
        ];
        let punches = shift("emp_001", "2026-01-12", 8);

        let row = calculate_employee_payroll(
            &employee,
            &punches,
            0,
            &week_period(),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(row.hourly_rate_cents, 1800);
        assert_eq!(row.regular_pay_cents, 14400);
    }

    #[test]
    fn test_salaried_employee_gets_prorated_pay_without_overtime() {
        let employee = Employee {
            compensation: CompensationTerms::Salary {
                salary_amount_cents: 100000,
                pay_period_type: PayPeriodType::Weekly,
            },
            ..hourly("emp_002", 0)
        };
        let punches = five_nine_hour_days("emp_002");

        let row = calculate_employee_payroll(
            &employee,
            &punches,
            0,
            &PayPeriod::new(date("2026-01-12"), date("2026-01-14")),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(row.compensation_type, CompensationType::Salary);
        assert_eq!(row.hourly_rate_cents, 0);
        assert_eq!(row.effective_hourly_rate_cents, 2500);
        assert_eq!(row.regular_pay_cents, 42857);
        assert_eq!(row.overtime_pay_cents, 0);
        assert_eq!(row.gross_pay_cents, 42857);
    }

    #[test]
    fn test_long_gap_session_is_surfaced_but_not_paid() {
        let employee = hourly("emp_001", 1500);
        let punches = vec![
            punch("in", "emp_001", PunchType::ClockIn, "2026-01-12 09:00:00"),
            punch("out", "emp_001", PunchType::ClockOut, "2026-01-14 09:00:00"),
        ];

        let row = calculate_employee_payroll(
            &employee,
            &punches,
            0,
            &week_period(),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(row.total_hours, Decimal::ZERO);
        assert_eq!(row.gross_pay_cents, 0);
        assert_eq!(row.incomplete_shifts.len(), 1);
        assert!(!row.incomplete_shifts[0].counted);
        assert!(
            row.incomplete_shifts[0]
                .anomalies
                .iter()
                .any(|a| a.code == AnomalyCode::MissingClockOut)
        );
    }

    #[test]
    fn test_sessions_outside_period_are_excluded() {
        let employee = hourly("emp_001", 1000);
        let mut punches = shift("emp_001", "2026-01-10", 8);
        punches.extend(shift("emp_001", "2026-01-12", 8));

        let row = calculate_employee_payroll(
            &employee,
            &punches,
            0,
            &week_period(),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(row.total_hours, Decimal::from(8));
    }

    #[test]
    fn test_assemble_period_totals_sum_rows() {
        let employees = vec![hourly("emp_001", 1500), hourly("emp_002", 2000)];
        let mut punches = five_nine_hour_days("emp_001");
        punches.extend(shift("emp_002", "2026-01-13", 6));
        punches.reverse();
        let tips = HashMap::from([("emp_002".to_string(), 1500)]);

        let payroll = assemble_payroll_period(
            "rest_001",
            &week_period(),
            &employees,
            &punches,
            &tips,
            &EngineConfig::default(),
        );

        assert_eq!(payroll.employees.len(), 2);
        assert!(payroll.errors.is_empty());
        assert_eq!(payroll.total_regular_hours, Decimal::from(46));
        assert_eq!(payroll.total_overtime_hours, Decimal::from(5));
        assert_eq!(payroll.total_regular_pay_cents, 60000 + 12000);
        assert_eq!(payroll.total_overtime_pay_cents, 11250);
        assert_eq!(payroll.total_gross_pay_cents, 71250 + 12000);
        assert_eq!(payroll.total_tips_cents, 1500);
        assert_eq!(payroll.total_pay_cents, 71250 + 12000 + 1500);
    }

    #[test]
    fn test_assemble_skips_inactive_employee_without_punches() {
        let mut former = hourly("emp_009", 1500);
        former.termination_date = Some(date("2025-12-31"));
        let employees = vec![hourly("emp_001", 1500), former];

        let payroll = assemble_payroll_period(
            "rest_001",
            &week_period(),
            &employees,
            &shift("emp_001", "2026-01-12", 8),
            &HashMap::new(),
            &EngineConfig::default(),
        );

        assert_eq!(payroll.employees.len(), 1);
        assert_eq!(payroll.employees[0].employee_id, "emp_001");
    }

    #[test]
    fn test_assemble_records_per_employee_errors() {
        let broken = Employee {
            compensation_history: vec![CompensationHistoryEntry {
                effective_date: date("2026-01-01"),
                compensation_type: CompensationType::Salary,
                amount_cents: 100000,
                pay_period_type: None,
                contractor_interval: None,
            }],
            ..hourly("emp_002", 1500)
        };
        let employees = vec![hourly("emp_001", 1500), broken];

        let payroll = assemble_payroll_period(
            "rest_001",
            &week_period(),
            &employees,
            &shift("emp_001", "2026-01-12", 8),
            &HashMap::new(),
            &EngineConfig::default(),
        );

        assert_eq!(payroll.employees.len(), 1);
        assert_eq!(payroll.errors.len(), 1);
        assert_eq!(payroll.errors[0].employee_id, "emp_002");
        assert!(payroll.errors[0].message.contains("pay_period_type"));
        assert_eq!(payroll.total_gross_pay_cents, 12000);
    }

    #[test]
    fn test_tips_overflow_is_a_calculation_error() {
        let employee = hourly("emp_001", 1500);
        let punches = shift("emp_001", "2026-01-12", 8);

        let err = calculate_employee_payroll(
            &employee,
            &punches,
            i64::MAX,
            &week_period(),
            &EngineConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::CalculationError { .. }));
    }

    #[test]
    fn test_assemble_records_overflowing_employee_as_error() {
        let employees = vec![hourly("emp_001", 1500), hourly("emp_002", 1500)];
        let mut punches = shift("emp_001", "2026-01-12", 8);
        punches.extend(shift("emp_002", "2026-01-12", 8));
        let tips = HashMap::from([("emp_002".to_string(), i64::MAX)]);

        let payroll = assemble_payroll_period(
            "rest_001",
            &week_period(),
            &employees,
            &punches,
            &tips,
            &EngineConfig::default(),
        );

        assert_eq!(payroll.employees.len(), 1);
        assert_eq!(payroll.errors.len(), 1);
        assert_eq!(payroll.errors[0].employee_id, "emp_002");
        assert_eq!(payroll.total_tips_cents, 0);
        assert_eq!(payroll.total_pay_cents, 12000);
    }

    #[test]
    fn test_assemble_keeps_totals_consistent_when_sums_overflow() {
        let employees = vec![hourly("emp_001", 1500), hourly("emp_002", 1500)];
        let mut punches = shift("emp_001", "2026-01-12", 8);
        punches.extend(shift("emp_002", "2026-01-12", 8));
        let tips = HashMap::from([("emp_001".to_string(), i64::MAX - 12000)]);

        let payroll = assemble_payroll_period(
            "rest_001",
            &week_period(),
            &employees,
            &punches,
            &tips,
            &EngineConfig::default(),
        );

        assert_eq!(payroll.employees.len(), 1);
        assert_eq!(payroll.employees[0].employee_id, "emp_001");
        assert_eq!(payroll.errors.len(), 1);
        assert_eq!(payroll.errors[0].employee_id, "emp_002");
        assert_eq!(payroll.total_pay_cents, i64::MAX);
        assert_eq!(payroll.total_gross_pay_cents, 12000);
        assert_eq!(payroll.total_regular_hours, Decimal::from(8));
    }
}
