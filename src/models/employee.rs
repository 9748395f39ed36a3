//! Employee model and compensation terms.
//!
//! Compensation is modelled as a tagged variant so that each kind of pay
//! arrangement carries exactly the fields it needs. All monetary fields are
//! integer cents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The broad kind of pay arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationType {
    /// Paid per hour worked.
    Hourly,
    /// Paid a fixed amount per pay period.
    Salary,
    /// Paid a fixed amount per interval or per job.
    Contractor,
}

impl std::fmt::Display for CompensationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompensationType::Hourly => write!(f, "hourly"),
            CompensationType::Salary => write!(f, "salary"),
            CompensationType::Contractor => write!(f, "contractor"),
        }
    }
}

/// How often a salaried employee is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayPeriodType {
    /// Every week.
    Weekly,
    /// Every two weeks.
    BiWeekly,
    /// Twice a month.
    SemiMonthly,
    /// Once a month.
    Monthly,
}

impl PayPeriodType {
    /// Number of pay periods in a year.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PayPeriodType::Weekly => 52,
            PayPeriodType::BiWeekly => 26,
            PayPeriodType::SemiMonthly => 24,
            PayPeriodType::Monthly => 12,
        }
    }
}

impl std::fmt::Display for PayPeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayPeriodType::Weekly => write!(f, "weekly"),
            PayPeriodType::BiWeekly => write!(f, "bi-weekly"),
            PayPeriodType::SemiMonthly => write!(f, "semi-monthly"),
            PayPeriodType::Monthly => write!(f, "monthly"),
        }
    }
}

/// How often a contractor is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractorInterval {
    /// Every week.
    Weekly,
    /// Every two weeks.
    BiWeekly,
    /// Once a month.
    Monthly,
    /// Per completed job; recorded as manual payments, never prorated.
    PerJob,
}

impl std::fmt::Display for ContractorInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractorInterval::Weekly => write!(f, "weekly"),
            ContractorInterval::BiWeekly => write!(f, "bi-weekly"),
            ContractorInterval::Monthly => write!(f, "monthly"),
            ContractorInterval::PerJob => write!(f, "per-job"),
        }
    }
}

/// The pay terms for an employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CompensationTerms, CompensationType};
///
/// let terms: CompensationTerms =
///     serde_json::from_str(r#"{"type": "hourly", "hourly_rate_cents": 1500}"#).unwrap();
/// assert_eq!(terms.compensation_type(), CompensationType::Hourly);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompensationTerms {
    /// Hourly pay.
    Hourly {
        /// Rate per hour in cents.
        hourly_rate_cents: i64,
    },
    /// Salaried pay.
    Salary {
        /// Salary per pay period in cents.
        salary_amount_cents: i64,
        /// The pay period the amount refers to.
        pay_period_type: PayPeriodType,
    },
    /// Contractor pay.
    Contractor {
        /// Payment per interval in cents.
        payment_amount_cents: i64,
        /// The interval the payment refers to.
        payment_interval: ContractorInterval,
    },
}

impl CompensationTerms {
    /// The broad kind of these terms.
    pub fn compensation_type(&self) -> CompensationType {
        match self {
            CompensationTerms::Hourly { .. } => CompensationType::Hourly,
            CompensationTerms::Salary { .. } => CompensationType::Salary,
            CompensationTerms::Contractor { .. } => CompensationType::Contractor,
        }
    }

    /// The hourly rate, for hourly terms.
    pub fn hourly_rate_cents(&self) -> Option<i64> {
        match self {
            CompensationTerms::Hourly { hourly_rate_cents } => Some(*hourly_rate_cents),
            _ => None,
        }
    }
}

/// A dated change to an employee's compensation.
///
/// Entries are append-only; the active entry for a date is the most recent
/// one whose `effective_date` is on or before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationHistoryEntry {
    /// The first day the entry applies.
    pub effective_date: NaiveDate,
    /// The kind of pay from that day.
    pub compensation_type: CompensationType,
    /// The rate, salary or payment amount in cents.
    pub amount_cents: i64,
    /// Pay period for salary entries.
    #[serde(default)]
    pub pay_period_type: Option<PayPeriodType>,
    /// Payment interval for contractor entries.
    #[serde(default)]
    pub contractor_interval: Option<ContractorInterval>,
}

/// An employee with the fields relevant to payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name used in exports.
    #[serde(default)]
    pub name: String,
    /// Job position used in exports.
    #[serde(default)]
    pub position: String,
    /// Current compensation terms.
    pub compensation: CompensationTerms,
    /// Whether salary is spread across days as a daily labor cost.
    #[serde(default = "default_allocate_daily")]
    pub allocate_daily: bool,
    /// First day of employment.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Last day of employment.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
    /// Dated compensation changes.
    #[serde(default)]
    pub compensation_history: Vec<CompensationHistoryEntry>,
}

fn default_allocate_daily() -> bool {
    true
}

impl Employee {
    /// Returns true if the employee was employed on `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{CompensationTerms, Employee};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ada".to_string(),
    ///     position: "Cook".to_string(),
    ///     compensation: CompensationTerms::Hourly { hourly_rate_cents: 1500 },
    ///     allocate_daily: true,
    ///     hire_date: NaiveDate::from_ymd_opt(2026, 1, 5),
    ///     termination_date: None,
    ///     compensation_history: vec![],
    /// };
    /// assert!(!employee.is_employed_on(NaiveDate::from_ymd_opt(2026, 1, 4).unwrap()));
    /// assert!(employee.is_employed_on(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()));
    /// ```
    pub fn is_employed_on(&self, date: NaiveDate) -> bool {
        self.hire_date.is_none_or(|hired| date >= hired)
            && self.termination_date.is_none_or(|terminated| date <= terminated)
    }

    /// Returns true if employment overlaps the inclusive range.
    pub fn is_employed_during(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.hire_date.is_none_or(|hired| hired <= end)
            && self.termination_date.is_none_or(|terminated| terminated >= start)
    }
}
