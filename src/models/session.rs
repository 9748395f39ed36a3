//! Work session and break models.
//!
//! Sessions are reconstructed from punches and carry the anomalies found
//! while pairing them, so a manager can review irregular shifts without the
//! engine refusing to compute.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A break taken inside a work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPeriod {
    /// When the break started.
    pub break_start: NaiveDateTime,
    /// When the break ended, if a matching end was punched.
    pub break_end: Option<NaiveDateTime>,
    /// Length of the break; zero for an incomplete break.
    pub duration_minutes: i64,
    /// Whether a matching end was punched.
    pub is_complete: bool,
}

impl BreakPeriod {
    /// A break that has started but not ended.
    pub fn open(break_start: NaiveDateTime) -> Self {
        Self {
            break_start,
            break_end: None,
            duration_minutes: 0,
            is_complete: false,
        }
    }

    /// Returns this break closed at `break_end`.
    pub fn closed_at(self, break_end: NaiveDateTime) -> Self {
        Self {
            duration_minutes: (break_end - self.break_start).num_minutes().max(0),
            break_end: Some(break_end),
            is_complete: true,
            ..self
        }
    }
}

/// Machine-readable anomaly category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyCode {
    /// The session has no usable clock out.
    MissingClockOut,
    /// The session is longer than the maximum shift length but still counted.
    ShiftTooLong,
    /// A break was started but never ended.
    IncompleteBreak,
    /// A break end arrived with no break in progress.
    UnmatchedBreakEnd,
}

/// A data-quality problem attached to a session for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAnomaly {
    /// The anomaly category.
    pub code: AnomalyCode,
    /// Human-readable explanation.
    pub message: String,
}

impl SessionAnomaly {
    /// Creates an anomaly.
    pub fn new(code: AnomalyCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A reconstructed work interval from clock in to clock out.
///
/// # Example
///
/// ```
/// use payroll_engine::models::WorkSession;
/// use chrono::NaiveDateTime;
///
/// let clock_in = NaiveDateTime::parse_from_str("2026-01-12 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let session = WorkSession::dangling("emp_001", clock_in, vec![], vec![]);
/// assert!(!session.is_complete);
/// assert_eq!(session.worked_minutes, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// The employee who worked the session.
    pub employee_id: String,
    /// When the session started.
    pub clock_in: NaiveDateTime,
    /// When the session ended, if known.
    pub clock_out: Option<NaiveDateTime>,
    /// Breaks taken during the session.
    #[serde(default)]
    pub breaks: Vec<BreakPeriod>,
    /// Minutes from clock in to clock out.
    pub total_minutes: i64,
    /// Sum of completed break durations.
    pub break_minutes: i64,
    /// Minutes that count toward hours.
    pub worked_minutes: i64,
    /// Whether the session has a usable clock out.
    pub is_complete: bool,
    /// Whether any anomaly was recorded.
    pub has_anomalies: bool,
    /// Anomalies found while reconstructing the session.
    #[serde(default)]
    pub anomalies: Vec<SessionAnomaly>,
}

impl WorkSession {
    /// A session with no usable clock out. It contributes no worked time;
    /// completed breaks are still summed into `break_minutes`.
    pub fn dangling(
        employee_id: impl Into<String>,
        clock_in: NaiveDateTime,
        breaks: Vec<BreakPeriod>,
        anomalies: Vec<SessionAnomaly>,
    ) -> Self {
        let break_minutes = breaks
            .iter()
            .filter(|b| b.is_complete)
            .map(|b| b.duration_minutes)
            .sum();
        Self {
            employee_id: employee_id.into(),
            clock_in,
            clock_out: None,
            breaks,
            total_minutes: 0,
            break_minutes,
            worked_minutes: 0,
            is_complete: false,
            has_anomalies: !anomalies.is_empty(),
            anomalies,
        }
    }

    /// The calendar date the session is attributed to.
    pub fn work_date(&self) -> NaiveDate {
        self.clock_in.date()
    }

    /// Whether an anomaly with the given code was recorded.
    pub fn has_anomaly(&self, code: AnomalyCode) -> bool {
        self.anomalies.iter().any(|a| a.code == code)
    }
}
