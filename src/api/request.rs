//! Request types for the payroll engine API.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, PayPeriod, Punch};

use super::response::ApiError;

/// Request body for `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsRequest {
    /// Raw punches for any number of employees, in any order.
    pub punches: Vec<Punch>,
}

/// Request body for `POST /allocations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationsRequest {
    /// The restaurant the allocations belong to.
    pub restaurant_id: String,
    /// The employee to allocate.
    pub employee: Employee,
    /// The employee's punches; needed for hourly days.
    #[serde(default)]
    pub punches: Vec<Punch>,
    /// First day to allocate (inclusive).
    pub start_date: NaiveDate,
    /// Last day to allocate (inclusive).
    pub end_date: NaiveDate,
}

impl AllocationsRequest {
    /// The requested range as a pay period.
    pub fn period(&self) -> Result<PayPeriod, ApiError> {
        checked_period(self.start_date, self.end_date)
    }
}

/// Request body for `POST /allocations/manual`.
///
/// `date` is kept as a string so that format problems are reported by the
/// engine's own validation rather than as a JSON error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualPaymentRequest {
    /// The contractor being paid.
    pub employee_id: String,
    /// The restaurant the payment belongs to.
    pub restaurant_id: String,
    /// Payment date as `yyyy-MM-dd`.
    pub date: String,
    /// Amount in cents.
    pub amount_cents: i64,
    /// What the payment was for.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for `POST /payroll` and `POST /payroll/csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The restaurant the payroll belongs to.
    pub restaurant_id: String,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Employees to include.
    pub employees: Vec<Employee>,
    /// Punches for any of the employees, in any order.
    #[serde(default)]
    pub punches: Vec<Punch>,
    /// Tips in cents keyed by employee id.
    #[serde(default)]
    pub tips: HashMap<String, i64>,
}

impl PayrollRequest {
    /// The requested period.
    pub fn period(&self) -> Result<PayPeriod, ApiError> {
        checked_period(self.start_date, self.end_date)
    }
}

fn checked_period(start_date: NaiveDate, end_date: NaiveDate) -> Result<PayPeriod, ApiError> {
    if end_date < start_date {
        return Err(ApiError::with_details(
            "VALIDATION_ERROR",
            format!("end_date {} is before start_date {}", end_date, start_date),
            "The period must end on or after the day it starts",
        ));
    }
    Ok(PayPeriod::new(start_date, end_date))
}
