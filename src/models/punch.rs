//! Punch model and related types.
//!
//! A punch is a single timestamped clock event recorded by a time clock.
//! Punches arrive unordered and noisy; [`ProcessedPunch`] carries the
//! normalizer's verdict alongside the untouched original.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The kind of clock event a punch records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchType {
    /// Start of a work session.
    ClockIn,
    /// End of a work session.
    ClockOut,
    /// Start of a break inside a session.
    BreakStart,
    /// End of a break inside a session.
    BreakEnd,
}

impl std::fmt::Display for PunchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PunchType::ClockIn => write!(f, "clock_in"),
            PunchType::ClockOut => write!(f, "clock_out"),
            PunchType::BreakStart => write!(f, "break_start"),
            PunchType::BreakEnd => write!(f, "break_end"),
        }
    }
}

/// A single clock event for one employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Punch, PunchType};
/// use chrono::NaiveDateTime;
///
/// let punch = Punch {
///     id: "p_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     punch_type: PunchType::ClockIn,
///     timestamp: NaiveDateTime::parse_from_str("2026-01-12 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// };
/// assert_eq!(punch.punch_type.to_string(), "clock_in");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// Unique identifier for the punch.
    pub id: String,
    /// The employee who punched.
    pub employee_id: String,
    /// The kind of event.
    #[serde(rename = "type")]
    pub punch_type: PunchType,
    /// When the event was recorded (restaurant-local time).
    pub timestamp: NaiveDateTime,
}

/// Why the normalizer flagged a punch as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseReason {
    /// One of three or more punches recorded in quick succession.
    Burst,
    /// A break start immediately undone by a clock in.
    BreakCanceled,
    /// A second punch within the noise window of another.
    Duplicate,
}

impl NoiseReason {
    /// Human-readable description used in audit output.
    pub fn description(&self) -> &'static str {
        match self {
            NoiseReason::Burst => "burst",
            NoiseReason::BreakCanceled => "break canceled",
            NoiseReason::Duplicate => "duplicate punch within 60s",
        }
    }
}

/// A punch annotated with the normalizer's verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedPunch {
    /// The original punch, unchanged.
    #[serde(flatten)]
    pub punch: Punch,
    /// Whether the punch is excluded from session reconstruction.
    pub is_noise: bool,
    /// Why the punch was flagged, when it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_reason: Option<NoiseReason>,
}

impl ProcessedPunch {
    /// Wraps a punch the normalizer kept.
    pub fn valid(punch: Punch) -> Self {
        Self {
            punch,
            is_noise: false,
            noise_reason: None,
        }
    }

    /// Wraps a punch the normalizer flagged.
    pub fn noise(punch: Punch, reason: NoiseReason) -> Self {
        Self {
            punch,
            is_noise: true,
            noise_reason: Some(reason),
        }
    }
}
