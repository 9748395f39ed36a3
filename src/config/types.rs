//! Configuration types for the payroll engine.
//!
//! These are the tunables a caller supplies for each run. Every field has a
//! default, so a YAML file only needs to name what it overrides.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ContractorInterval, PayPeriodType};

/// What a clock in means while a break is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakResumePolicy {
    /// The clock in ends the break and the session continues.
    #[default]
    ImplicitBreakEnd,
    /// The clock in starts a new session; the open one is left incomplete.
    NewSession,
}

/// Average number of days in each salary pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPeriodDays {
    /// Days in a weekly period.
    pub weekly: Decimal,
    /// Days in a bi-weekly period.
    pub bi_weekly: Decimal,
    /// Days in a semi-monthly period.
    pub semi_monthly: Decimal,
    /// Days in a monthly period.
    pub monthly: Decimal,
}

impl Default for PayPeriodDays {
    fn default() -> Self {
        Self {
            weekly: Decimal::from(7),
            bi_weekly: Decimal::from(14),
            semi_monthly: Decimal::new(1522, 2),
            monthly: Decimal::new(3044, 2),
        }
    }
}

impl PayPeriodDays {
    /// Days used to spread a salary of the given period.
    pub fn days_for(&self, period: PayPeriodType) -> Decimal {
        match period {
            PayPeriodType::Weekly => self.weekly,
            PayPeriodType::BiWeekly => self.bi_weekly,
            PayPeriodType::SemiMonthly => self.semi_monthly,
            PayPeriodType::Monthly => self.monthly,
        }
    }
}

/// Average number of days in each contractor payment interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractorIntervalDays {
    /// Days in a weekly interval.
    pub weekly: Decimal,
    /// Days in a bi-weekly interval.
    pub bi_weekly: Decimal,
    /// Days in a monthly interval.
    pub monthly: Decimal,
}

impl Default for ContractorIntervalDays {
    fn default() -> Self {
        Self {
            weekly: Decimal::from(7),
            bi_weekly: Decimal::from(14),
            monthly: Decimal::new(3044, 2),
        }
    }
}

impl ContractorIntervalDays {
    /// Days used to spread a contractor payment, or `None` for per-job work.
    pub fn days_for(&self, interval: ContractorInterval) -> Option<Decimal> {
        match interval {
            ContractorInterval::Weekly => Some(self.weekly),
            ContractorInterval::BiWeekly => Some(self.bi_weekly),
            ContractorInterval::Monthly => Some(self.monthly),
            ContractorInterval::PerJob => None,
        }
    }
}

/// Upper bound for the shift thresholds, in hours.
pub const MAX_SHIFT_THRESHOLD_HOURS: i64 = 24 * 366;

/// Upper bound for the noise window, in seconds.
pub const MAX_NOISE_WINDOW_SECONDS: i64 = 86_400;

/// Tunables for every stage of the engine.
///
/// # Example
///
/// ```
/// use payroll_engine::config::EngineConfig;
/// use chrono::Weekday;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.max_shift_hours, 16);
/// assert_eq!(config.max_shift_gap_hours, 18);
/// assert_eq!(config.week_start_day, Weekday::Sun);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sessions longer than this are counted but flagged.
    pub max_shift_hours: i64,
    /// Sessions longer than this are not counted.
    pub max_shift_gap_hours: i64,
    /// Punches closer together than this form a noise group.
    pub noise_window_seconds: i64,
    /// How a clock in during a break is read.
    pub break_resume_policy: BreakResumePolicy,
    /// First day of the overtime week.
    pub week_start_day: Weekday,
    /// Weekly hours before overtime applies.
    pub standard_work_week_hours: Decimal,
    /// Multiplier applied to the hourly rate for overtime.
    pub overtime_multiplier: Decimal,
    /// Weekly hours assumed when deriving a salaried employee's hourly rate.
    pub standard_hours_per_week: Decimal,
    /// Days per salary pay period.
    pub pay_period_days: PayPeriodDays,
    /// Days per contractor payment interval.
    pub contractor_interval_days: ContractorIntervalDays,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_shift_hours: 16,
            max_shift_gap_hours: 18,
            noise_window_seconds: 60,
            break_resume_policy: BreakResumePolicy::default(),
            week_start_day: Weekday::Sun,
            standard_work_week_hours: Decimal::from(40),
            overtime_multiplier: Decimal::new(15, 1),
            standard_hours_per_week: Decimal::from(40),
            pay_period_days: PayPeriodDays::default(),
            contractor_interval_days: ContractorIntervalDays::default(),
        }
    }
}

impl EngineConfig {
    /// Checks that every threshold and divisor is usable.
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_shift_hours <= 0 {
            return Err(invalid("max_shift_hours", "must be positive"));
        }
        if self.max_shift_gap_hours < self.max_shift_hours {
            return Err(invalid(
                "max_shift_gap_hours",
                "must be at least max_shift_hours",
            ));
        }
        if self.max_shift_gap_hours > MAX_SHIFT_THRESHOLD_HOURS {
            return Err(invalid(
                "max_shift_gap_hours",
                &format!("must be at most {}", MAX_SHIFT_THRESHOLD_HOURS),
            ));
        }
        if self.noise_window_seconds < 0 {
            return Err(invalid("noise_window_seconds", "must not be negative"));
        }
        if self.noise_window_seconds > MAX_NOISE_WINDOW_SECONDS {
            return Err(invalid(
                "noise_window_seconds",
                &format!("must be at most {}", MAX_NOISE_WINDOW_SECONDS),
            ));
        }
        if self.standard_work_week_hours <= Decimal::ZERO {
            return Err(invalid("standard_work_week_hours", "must be positive"));
        }
        if self.overtime_multiplier <= Decimal::ZERO {
            return Err(invalid("overtime_multiplier", "must be positive"));
        }
        if self.standard_hours_per_week <= Decimal::ZERO {
            return Err(invalid("standard_hours_per_week", "must be positive"));
        }

        let pay_days = &self.pay_period_days;
        for (field, days) in [
            ("pay_period_days.weekly", pay_days.weekly),
            ("pay_period_days.bi_weekly", pay_days.bi_weekly),
            ("pay_period_days.semi_monthly", pay_days.semi_monthly),
            ("pay_period_days.monthly", pay_days.monthly),
        ] {
            if days <= Decimal::ZERO {
                return Err(invalid(field, "must be positive"));
            }
        }

        let interval_days = &self.contractor_interval_days;
        for (field, days) in [
            ("contractor_interval_days.weekly", interval_days.weekly),
            ("contractor_interval_days.bi_weekly", interval_days.bi_weekly),
            ("contractor_interval_days.monthly", interval_days.monthly),
        ] {
            if days <= Decimal::ZERO {
                return Err(invalid(field, "must be positive"));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_day_counts() {
        let config = EngineConfig::default();
        assert_eq!(
            config.pay_period_days.days_for(PayPeriodType::SemiMonthly),
            Decimal::new(1522, 2)
        );
        assert_eq!(
            config.pay_period_days.days_for(PayPeriodType::Monthly),
            Decimal::new(3044, 2)
        );
        assert_eq!(
            config
                .contractor_interval_days
                .days_for(ContractorInterval::BiWeekly),
            Some(Decimal::from(14))
        );
        assert_eq!(
            config
                .contractor_interval_days
                .days_for(ContractorInterval::PerJob),
            None
        );
    }

    #[test]
    fn test_gap_shorter_than_shift_is_rejected() {
        let config = EngineConfig {
            max_shift_hours: 16,
            max_shift_gap_hours: 12,
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { ref field, .. } if field == "max_shift_gap_hours"));
    }

    #[test]
    fn test_oversized_thresholds_are_rejected() {
        let huge_gap = EngineConfig {
            max_shift_gap_hours: i64::MAX,
            ..EngineConfig::default()
        };
        let err = huge_gap.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { ref field, .. } if field == "max_shift_gap_hours"));

        let huge_shift = EngineConfig {
            max_shift_hours: MAX_SHIFT_THRESHOLD_HOURS + 1,
            max_shift_gap_hours: MAX_SHIFT_THRESHOLD_HOURS + 1,
            ..EngineConfig::default()
        };
        assert!(huge_shift.validate().is_err());

        let huge_window = EngineConfig {
            noise_window_seconds: MAX_NOISE_WINDOW_SECONDS + 1,
            ..EngineConfig::default()
        };
        let err = huge_window.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { ref field, .. } if field == "noise_window_seconds"));
    }

    #[test]
    fn test_thresholds_at_upper_bounds_are_accepted() {
        let config = EngineConfig {
            max_shift_hours: MAX_SHIFT_THRESHOLD_HOURS,
            max_shift_gap_hours: MAX_SHIFT_THRESHOLD_HOURS,
            noise_window_seconds: MAX_NOISE_WINDOW_SECONDS,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_pay_period_days_is_rejected() {
        let mut config = EngineConfig::default();
        config.pay_period_days.monthly = Decimal::ZERO;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { ref field, .. } if field == "pay_period_days.monthly"));
    }

    #[test]
    fn test_break_resume_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&BreakResumePolicy::ImplicitBreakEnd).unwrap(),
            "\"implicit_break_end\""
        );
        assert_eq!(
            serde_json::to_string(&BreakResumePolicy::NewSession).unwrap(),
            "\"new_session\""
        );
    }
}
