//! Punch noise detection.
//!
//! Time clocks produce double presses, bursts of taps and breaks that are
//! started by mistake and immediately undone. This module flags those punches
//! without dropping any of them, so the original stream stays auditable.

use std::collections::BTreeMap;

use chrono::Duration;
use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{NoiseReason, ProcessedPunch, Punch, PunchType};

/// Splits a mixed punch stream into per-employee lists.
///
/// Employees are ordered by id and each list keeps the input order.
pub fn partition_by_employee(punches: &[Punch]) -> BTreeMap<String, Vec<Punch>> {
    punches
        .iter()
        .fold(BTreeMap::new(), |mut by_employee: BTreeMap<String, Vec<Punch>>, punch| {
            by_employee
                .entry(punch.employee_id.clone())
                .or_default()
                .push(punch.clone());
            by_employee
        })
}

/// Flags noisy punches in a raw punch stream.
///
/// Punches are processed per employee in timestamp order (ties broken by
/// id). A punch joins the current noise group when it falls within
/// `noise_window_seconds` of the previous member. Each group is then
/// classified:
///
/// - three or more punches: the first is kept, the rest are a `burst`
/// - a `break_start` followed by a `clock_in`: the break was canceled, so the
///   `break_start` is flagged and the `clock_in` kept
/// - two punches of the same type: a double press, the later one is kept
/// - any other pair: the first is kept, the second is a `duplicate`
///
/// Every input punch appears exactly once in the output. Because kept punches
/// of adjacent groups are always more than a window apart, running this again
/// over the kept punches flags nothing.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::normalize_punches;
/// use payroll_engine::config::EngineConfig;
/// use payroll_engine::models::{NoiseReason, Punch, PunchType};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punches = vec![
///     Punch { id: "a".into(), employee_id: "emp_001".into(), punch_type: PunchType::ClockIn, timestamp: at("2026-01-12 09:00:00") },
///     Punch { id: "b".into(), employee_id: "emp_001".into(), punch_type: PunchType::ClockIn, timestamp: at("2026-01-12 09:00:30") },
/// ];
///
/// let processed = normalize_punches(&punches, &EngineConfig::default());
/// assert_eq!(processed[0].noise_reason, Some(NoiseReason::Duplicate));
/// assert!(!processed[1].is_noise);
/// ```
pub fn normalize_punches(punches: &[Punch], config: &EngineConfig) -> Vec<ProcessedPunch> {
    let window = Duration::seconds(config.noise_window_seconds);

    partition_by_employee(punches)
        .into_values()
        .flat_map(|mut employee_punches| {
            employee_punches.sort_by(|a, b| {
                a.timestamp
                    .cmp(&b.timestamp)
                    .then_with(|| a.id.cmp(&b.id))
            });
            noise_groups(employee_punches, window)
                .into_iter()
                .flat_map(classify_group)
        })
        .collect()
}

/// Groups sorted punches so that each member is within `window` of the one
/// before it.
fn noise_groups(sorted: Vec<Punch>, window: Duration) -> Vec<Vec<Punch>> {
    sorted
        .into_iter()
        .fold(Vec::new(), |mut groups: Vec<Vec<Punch>>, punch| {
            let joins_last = groups
                .last()
                .and_then(|group| group.last())
                .is_some_and(|prev| punch.timestamp - prev.timestamp <= window);

            match groups.last_mut() {
                Some(group) if joins_last => group.push(punch),
                _ => groups.push(vec![punch]),
            }
            groups
        })
}

fn classify_group(group: Vec<Punch>) -> Vec<ProcessedPunch> {
    let group = match <[Punch; 2]>::try_from(group) {
        Ok([first, second]) => return classify_pair(first, second),
        Err(group) => group,
    };

    group
        .into_iter()
        .enumerate()
        .map(|(index, punch)| {
            if index == 0 {
                ProcessedPunch::valid(punch)
            } else {
                debug!(
                    punch_id = %punch.id,
                    employee_id = %punch.employee_id,
                    "Flagged punch as burst noise"
                );
                ProcessedPunch::noise(punch, NoiseReason::Burst)
            }
        })
        .collect()
}

fn classify_pair(first: Punch, second: Punch) -> Vec<ProcessedPunch> {
    let (first, second) = match (first.punch_type, second.punch_type) {
        (PunchType::BreakStart, PunchType::ClockIn) => (
            ProcessedPunch::noise(first, NoiseReason::BreakCanceled),
            ProcessedPunch::valid(second),
        ),
        (a, b) if a == b => (
            ProcessedPunch::noise(first, NoiseReason::Duplicate),
            ProcessedPunch::valid(second),
        ),
        _ => (
            ProcessedPunch::valid(first),
            ProcessedPunch::noise(second, NoiseReason::Duplicate),
        ),
    };

    for flagged in [&first, &second].into_iter().filter(|p| p.is_noise) {
        debug!(
            punch_id = %flagged.punch.id,
            employee_id = %flagged.punch.employee_id,
            reason = flagged.noise_reason.map(|r| r.description()).unwrap_or_default(),
            "Flagged punch as noise"
        );
    }

    vec![first, second]
}
