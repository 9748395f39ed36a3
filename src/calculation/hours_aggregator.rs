//! Weekly hours aggregation and overtime split.
//!
//! Overtime is a weekly concept: worked time is bucketed into calendar weeks
//! and each week is split against the standard work week on its own, so a
//! period that spans several weeks never pools hours across them.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::{PayPeriod, WorkSession};

/// Worked time attributed to one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHours {
    /// The calendar day.
    pub date: NaiveDate,
    /// Worked minutes on that day.
    pub worked_minutes: i64,
    /// Worked minutes as decimal hours.
    pub worked_hours: Decimal,
}

/// Worked time for one calendar week, split into regular and overtime hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    /// First day of the week.
    pub week_start: NaiveDate,
    /// All worked hours in the week.
    pub worked_hours: Decimal,
    /// Hours up to the standard work week.
    pub regular_hours: Decimal,
    /// Hours beyond the standard work week.
    pub overtime_hours: Decimal,
}

/// Hours for one employee across a queried range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSummary {
    /// One entry per week with worked time, in date order.
    pub weeks: Vec<WeeklyHours>,
    /// One entry per day with worked time, in date order.
    pub days: Vec<DailyHours>,
    /// All worked hours.
    pub total_hours: Decimal,
    /// Sum of weekly regular hours.
    pub regular_hours: Decimal,
    /// Sum of weekly overtime hours.
    pub overtime_hours: Decimal,
}

impl HoursSummary {
    /// Worked hours on `date`, zero when nothing was worked.
    pub fn hours_on(&self, date: NaiveDate) -> Decimal {
        self.days
            .iter()
            .find(|d| d.date == date)
            .map(|d| d.worked_hours)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Returns the first day of the week containing `date`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::week_start_for;
/// use chrono::{NaiveDate, Weekday};
///
/// // 2026-01-14 is a Wednesday
/// let date = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// assert_eq!(week_start_for(date, Weekday::Sun), NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
/// assert_eq!(week_start_for(date, Weekday::Mon), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// ```
pub fn week_start_for(date: NaiveDate, week_start_day: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_sunday() + 7
        - week_start_day.num_days_from_sunday())
        % 7;
    date - Days::new(u64::from(offset))
}

/// Splits a week's worked hours at the overtime threshold.
///
/// Returns `(regular_hours, overtime_hours)`; the two always sum to
/// `worked_hours`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::split_weekly_overtime;
/// use rust_decimal::Decimal;
///
/// let (regular, overtime) = split_weekly_overtime(Decimal::from(45), Decimal::from(40));
/// assert_eq!(regular, Decimal::from(40));
/// assert_eq!(overtime, Decimal::from(5));
/// ```
pub fn split_weekly_overtime(worked_hours: Decimal, threshold: Decimal) -> (Decimal, Decimal) {
    let regular_hours = worked_hours.min(threshold);
    let overtime_hours = (worked_hours - threshold).max(Decimal::ZERO);
    (regular_hours, overtime_hours)
}

/// Keeps sessions whose clock in falls within the period.
pub fn sessions_in_range(sessions: &[WorkSession], period: &PayPeriod) -> Vec<WorkSession> {
    sessions
        .iter()
        .filter(|s| period.contains_date(s.work_date()))
        .cloned()
        .collect()
}

/// Aggregates one employee's sessions into daily and weekly hours.
///
/// Each session counts toward the day and week of its clock in. Sessions
/// that were not counted (no usable clock out) carry zero worked minutes and
/// so contribute nothing.
pub fn aggregate_hours(sessions: &[WorkSession], config: &EngineConfig) -> HoursSummary {
    let minutes_by_day = sessions
        .iter()
        .filter(|s| s.worked_minutes > 0)
        .fold(BTreeMap::new(), |mut by_day: BTreeMap<NaiveDate, i64>, s| {
            *by_day.entry(s.work_date()).or_default() += s.worked_minutes;
            by_day
        });

    let minutes_by_week = minutes_by_day.iter().fold(
        BTreeMap::new(),
        |mut by_week: BTreeMap<NaiveDate, i64>, (date, minutes)| {
            *by_week
                .entry(week_start_for(*date, config.week_start_day))
                .or_default() += minutes;
            by_week
        },
    );

    let days: Vec<DailyHours> = minutes_by_day
        .into_iter()
        .map(|(date, worked_minutes)| DailyHours {
            date,
            worked_minutes,
            worked_hours: minutes_to_hours(worked_minutes),
        })
        .collect();

    let weeks: Vec<WeeklyHours> = minutes_by_week
        .into_iter()
        .map(|(week_start, minutes)| {
            let worked_hours = minutes_to_hours(minutes);
            let (regular_hours, overtime_hours) =
                split_weekly_overtime(worked_hours, config.standard_work_week_hours);
            WeeklyHours {
                week_start,
                worked_hours,
                regular_hours,
                overtime_hours,
            }
        })
        .collect();

    HoursSummary {
        total_hours: weeks.iter().map(|w| w.worked_hours).sum(),
        regular_hours: weeks.iter().map(|w| w.regular_hours).sum(),
        overtime_hours: weeks.iter().map(|w| w.overtime_hours).sum(),
        weeks,
        days,
    }
}

fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn session(clock_in: &str, worked_hours: i64) -> WorkSession {
        let clock_in = NaiveDateTime::parse_from_str(clock_in, "%Y-%m-%d %H:%M:%S").unwrap();
        WorkSession {
            employee_id: "emp_001".to_string(),
            clock_in,
            clock_out: Some(clock_in + chrono::TimeDelta::hours(worked_hours)),
            breaks: vec![],
            total_minutes: worked_hours * 60,
            break_minutes: 0,
            worked_minutes: worked_hours * 60,
            is_complete: true,
            has_anomalies: false,
            anomalies: vec![],
        }
    }

    // HA-001: 45 hours in one week splits into 40 regular and 5 overtime
    #[test]
    fn test_ha_001_single_week_overtime() {
        let sessions: Vec<WorkSession> = [
            "2026-01-12 08:00:00",
            "2026-01-13 08:00:00",
            "2026-01-14 08:00:00",
            "2026-01-15 08:00:00",
            "2026-01-16 08:00:00",
        ]
        .iter()
        .map(|ts| session(ts, 9))
        .collect();

        let summary = aggregate_hours(&sessions, &EngineConfig::default());

        assert_eq!(summary.weeks.len(), 1);
        assert_eq!(summary.total_hours, Decimal::from(45));
        assert_eq!(summary.regular_hours, Decimal::from(40));
        assert_eq!(summary.overtime_hours, Decimal::from(5));
        assert_eq!(summary.days.len(), 5);
    }

    // HA-002: overtime is not pooled across weeks
    #[test]
    fn test_ha_002_weeks_split_independently() {
        // Saturday 2026-01-17 and Sunday 2026-01-18 fall in different Sunday-start weeks
        let mut sessions: Vec<WorkSession> = (12..=16)
            .map(|day| session(&format!("2026-01-{} 08:00:00", day), 8))
            .collect();
        sessions.push(session("2026-01-17 08:00:00", 4));
        sessions.push(session("2026-01-18 08:00:00", 8));

        let summary = aggregate_hours(&sessions, &EngineConfig::default());

        assert_eq!(summary.weeks.len(), 2);
        assert_eq!(summary.weeks[0].week_start, date("2026-01-11"));
        assert_eq!(summary.weeks[0].regular_hours, Decimal::from(40));
        assert_eq!(summary.weeks[0].overtime_hours, Decimal::from(4));
        assert_eq!(summary.weeks[1].week_start, date("2026-01-18"));
        assert_eq!(summary.weeks[1].overtime_hours, Decimal::ZERO);
        assert_eq!(summary.overtime_hours, Decimal::from(4));
        assert_eq!(summary.total_hours, Decimal::from(52));
    }

    // HA-003: a Monday week start moves Sunday into the previous week
    #[test]
    fn test_ha_003_configurable_week_start() {
        let config = EngineConfig {
            week_start_day: Weekday::Mon,
            ..EngineConfig::default()
        };
        let sessions = vec![
            session("2026-01-12 08:00:00", 10),
            session("2026-01-18 08:00:00", 10),
        ];

        let summary = aggregate_hours(&sessions, &config);
        assert_eq!(summary.weeks.len(), 1);
        assert_eq!(summary.weeks[0].week_start, date("2026-01-12"));
    }

    #[test]
    fn test_uncounted_sessions_contribute_nothing() {
        let mut uncounted = session("2026-01-12 08:00:00", 48);
        uncounted.worked_minutes = 0;
        uncounted.is_complete = false;

        let summary = aggregate_hours(&[uncounted], &EngineConfig::default());

        assert!(summary.weeks.is_empty());
        assert_eq!(summary.total_hours, Decimal::ZERO);
    }

    #[test]
    fn test_fractional_hours() {
        let mut short = session("2026-01-12 08:00:00", 0);
        short.worked_minutes = 90;

        let summary = aggregate_hours(&[short], &EngineConfig::default());
        assert_eq!(summary.total_hours, Decimal::new(15, 1));
        assert_eq!(summary.hours_on(date("2026-01-12")), Decimal::new(15, 1));
        assert_eq!(summary.hours_on(date("2026-01-13")), Decimal::ZERO);
    }

    #[test]
    fn test_sessions_in_range_is_inclusive() {
        let sessions = vec![
            session("2026-01-11 23:00:00", 2),
            session("2026-01-12 08:00:00", 8),
            session("2026-01-18 08:00:00", 8),
            session("2026-01-19 08:00:00", 8),
        ];

        let period = PayPeriod::new(date("2026-01-12"), date("2026-01-18"));
        let kept = sessions_in_range(&sessions, &period);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_week_start_on_start_day_is_same_day() {
        assert_eq!(
            week_start_for(date("2026-01-11"), Weekday::Sun),
            date("2026-01-11")
        );
        assert_eq!(
            week_start_for(date("2026-01-17"), Weekday::Sun),
            date("2026-01-11")
        );
    }

    proptest! {
        #[test]
        fn prop_weekly_split_conserves_hours(cents_of_hours in 0i64..20_000) {
            let worked = Decimal::new(cents_of_hours, 2);
            let threshold = Decimal::from(40);

            let (regular, overtime) = split_weekly_overtime(worked, threshold);

            prop_assert_eq!(regular + overtime, worked);
            prop_assert!(regular <= threshold);
            prop_assert!(overtime >= Decimal::ZERO);
        }
    }
}
