//! Payroll result models.
//!
//! These are read-only results produced by the payroll assembler. Totals on
//! [`PayrollPeriod`] are always the sums of its employee rows.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CompensationType, SessionAnomaly, WorkSession};

/// An irregular session surfaced on a payroll row for manager review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteShift {
    /// When the session started.
    pub clock_in: NaiveDateTime,
    /// When the session ended, if known.
    pub clock_out: Option<NaiveDateTime>,
    /// Whether the session's time was counted.
    pub counted: bool,
    /// The anomalies found on the session.
    pub anomalies: Vec<SessionAnomaly>,
}

impl From<&WorkSession> for IncompleteShift {
    fn from(session: &WorkSession) -> Self {
        IncompleteShift {
            clock_in: session.clock_in,
            clock_out: session.clock_out,
            counted: session.is_complete,
            anomalies: session.anomalies.clone(),
        }
    }
}

/// Payroll result for one employee over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayroll {
    /// The employee's identifier.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The employee's position.
    pub position: String,
    /// The kind of pay the period was computed with.
    pub compensation_type: CompensationType,
    /// Hourly rate in cents; zero for salaried and contract staff.
    pub hourly_rate_cents: i64,
    /// Hourly rate for reporting. A salary is converted at the configured
    /// standard hours per week; contractors report zero.
    #[serde(default)]
    pub effective_hourly_rate_cents: i64,
    /// Hours within the weekly threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the weekly threshold.
    pub overtime_hours: Decimal,
    /// Regular plus overtime hours.
    pub total_hours: Decimal,
    /// Pay for regular hours, or the prorated salary or contract amount.
    pub regular_pay_cents: i64,
    /// Pay for overtime hours.
    pub overtime_pay_cents: i64,
    /// Regular plus overtime pay.
    pub gross_pay_cents: i64,
    /// Tips from the tip-pooling subsystem.
    pub tips_cents: i64,
    /// Gross pay plus tips.
    pub total_pay_cents: i64,
    /// Sessions with anomalies.
    #[serde(default)]
    pub incomplete_shifts: Vec<IncompleteShift>,
}

/// An employee whose payroll could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollError {
    /// The employee's identifier.
    pub employee_id: String,
    /// Why the computation failed.
    pub message: String,
}

/// Payroll results for all employees over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The restaurant the payroll belongs to.
    pub restaurant_id: String,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// One row per employee.
    pub employees: Vec<EmployeePayroll>,
    /// Sum of regular hours.
    pub total_regular_hours: Decimal,
    /// Sum of overtime hours.
    pub total_overtime_hours: Decimal,
    /// Sum of regular pay.
    pub total_regular_pay_cents: i64,
    /// Sum of overtime pay.
    pub total_overtime_pay_cents: i64,
    /// Sum of gross pay.
    pub total_gross_pay_cents: i64,
    /// Sum of tips.
    pub total_tips_cents: i64,
    /// Sum of total pay.
    pub total_pay_cents: i64,
    /// Employees that could not be computed.
    #[serde(default)]
    pub errors: Vec<PayrollError>,
}
