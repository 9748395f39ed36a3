//! Work session reconstruction.
//!
//! Pairs normalized punches into sessions with an explicit state machine:
//!
//! | state \ punch | clock_in | break_start | break_end | clock_out |
//! |---|---|---|---|---|
//! | `Idle` | open session | ignored | ignored | ignored |
//! | `Open` | close prior as missing clock out, open new | start break | flag unmatched | close |
//! | `OnBreak` | per [`BreakResumePolicy`] | ignored | end break | flag incomplete break, close |
//!
//! Reconstruction never fails. Irregularities are attached to the affected
//! session as [`SessionAnomaly`] entries for manager review.

use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{BreakResumePolicy, EngineConfig};
use crate::models::{
    AnomalyCode, BreakPeriod, ProcessedPunch, Punch, PunchType, SessionAnomaly, WorkSession,
};

use super::punch_normalizer::partition_by_employee;

/// A session that has been clocked into but not yet closed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenSession {
    clock_in: NaiveDateTime,
    breaks: Vec<BreakPeriod>,
    anomalies: Vec<SessionAnomaly>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Idle,
    Open(OpenSession),
    OnBreak {
        session: OpenSession,
        current_break: BreakPeriod,
    },
}

/// Per-employee context threaded through every transition.
struct Reconstruction<'a> {
    employee_id: &'a str,
    config: &'a EngineConfig,
}

impl OpenSession {
    fn new(clock_in: NaiveDateTime) -> Self {
        Self {
            clock_in,
            breaks: Vec::new(),
            anomalies: Vec::new(),
        }
    }

    fn with_anomaly(self, code: AnomalyCode, message: String) -> Self {
        let mut anomalies = self.anomalies;
        anomalies.push(SessionAnomaly::new(code, message));
        Self { anomalies, ..self }
    }

    fn with_break(self, completed: BreakPeriod) -> Self {
        let mut breaks = self.breaks;
        breaks.push(completed);
        Self { breaks, ..self }
    }

    fn with_incomplete_break(self, open_break: BreakPeriod) -> Self {
        let message = format!(
            "break started at {} was never ended",
            open_break.break_start.format("%Y-%m-%d %H:%M")
        );
        self.with_break(open_break)
            .with_anomaly(AnomalyCode::IncompleteBreak, message)
    }
}

impl Reconstruction<'_> {
    fn transition(
        &self,
        state: SessionState,
        punch: &Punch,
    ) -> (SessionState, Option<WorkSession>) {
        let at = punch.timestamp;

        match (state, punch.punch_type) {
            (SessionState::Idle, PunchType::ClockIn) => {
                (SessionState::Open(OpenSession::new(at)), None)
            }
            (SessionState::Idle, punch_type) => {
                warn!(
                    employee_id = %self.employee_id,
                    punch_id = %punch.id,
                    punch_type = %punch_type,
                    "Ignoring punch outside of any session"
                );
                (SessionState::Idle, None)
            }

            (SessionState::Open(session), PunchType::ClockIn) => (
                SessionState::Open(OpenSession::new(at)),
                Some(self.abandon(session, at)),
            ),
            (SessionState::Open(session), PunchType::BreakStart) => (
                SessionState::OnBreak {
                    session,
                    current_break: BreakPeriod::open(at),
                },
                None,
            ),
            (SessionState::Open(session), PunchType::BreakEnd) => {
                let message = format!(
                    "break end at {} has no matching break start",
                    at.format("%Y-%m-%d %H:%M")
                );
                (
                    SessionState::Open(session.with_anomaly(AnomalyCode::UnmatchedBreakEnd, message)),
                    None,
                )
            }
            (SessionState::Open(session), PunchType::ClockOut) => {
                (SessionState::Idle, Some(self.close(session, at)))
            }

            (
                SessionState::OnBreak {
                    session,
                    current_break,
                },
                PunchType::BreakEnd,
            ) => (
                SessionState::Open(session.with_break(current_break.closed_at(at))),
                None,
            ),
            (state @ SessionState::OnBreak { .. }, PunchType::BreakStart) => {
                debug!(
                    employee_id = %self.employee_id,
                    punch_id = %punch.id,
                    "Ignoring break start while a break is already in progress"
                );
                (state, None)
            }
            (
                SessionState::OnBreak {
                    session,
                    current_break,
                },
                PunchType::ClockIn,
            ) => match self.config.break_resume_policy {
                BreakResumePolicy::ImplicitBreakEnd => (
                    SessionState::Open(session.with_break(current_break.closed_at(at))),
                    None,
                ),
                BreakResumePolicy::NewSession => (
                    SessionState::Open(OpenSession::new(at)),
                    Some(self.abandon(session.with_incomplete_break(current_break), at)),
                ),
            },
            (
                SessionState::OnBreak {
                    session,
                    current_break,
                },
                PunchType::ClockOut,
            ) => (
                SessionState::Idle,
                Some(self.close(session.with_incomplete_break(current_break), at)),
            ),
        }
    }

    /// Flushes whatever is still open when the punches run out.
    fn finish(&self, state: SessionState) -> Option<WorkSession> {
        let session = match state {
            SessionState::Idle => return None,
            SessionState::Open(session) => session,
            SessionState::OnBreak {
                session,
                current_break,
            } => session.with_incomplete_break(current_break),
        };

        let session = session.with_anomaly(
            AnomalyCode::MissingClockOut,
            "no clock out before the end of recorded punches".to_string(),
        );
        Some(self.dangling(session))
    }

    /// Closes a session that was superseded by a new clock in.
    fn abandon(&self, session: OpenSession, next_clock_in: NaiveDateTime) -> WorkSession {
        let gap = next_clock_in - session.clock_in;
        let message = if gap > TimeDelta::hours(self.config.max_shift_gap_hours) {
            format!(
                "no clock out; next clock in was {}h later, beyond the {}h gap threshold",
                hours_label(gap.num_minutes()),
                self.config.max_shift_gap_hours
            )
        } else {
            "missing clock out".to_string()
        };
        self.dangling(session.with_anomaly(AnomalyCode::MissingClockOut, message))
    }

    fn close(&self, session: OpenSession, clock_out: NaiveDateTime) -> WorkSession {
        let total_minutes = (clock_out - session.clock_in).num_minutes();
        let break_minutes: i64 = session.breaks.iter().map(|b| b.duration_minutes).sum();

        let (session, counted) = if total_minutes > self.config.max_shift_gap_hours * 60 {
            let message = format!(
                "shift of {}h exceeds the {}h gap threshold; likely missing punches",
                hours_label(total_minutes),
                self.config.max_shift_gap_hours
            );
            (
                session.with_anomaly(AnomalyCode::MissingClockOut, message),
                false,
            )
        } else if total_minutes > self.config.max_shift_hours * 60 {
            let message = format!(
                "shift of {}h exceeds the {}h maximum",
                hours_label(total_minutes),
                self.config.max_shift_hours
            );
            (
                session.with_anomaly(AnomalyCode::ShiftTooLong, message),
                true,
            )
        } else {
            (session, true)
        };

        let worked_minutes = if counted {
            (total_minutes - break_minutes).max(0)
        } else {
            0
        };

        if !session.anomalies.is_empty() {
            debug!(
                employee_id = %self.employee_id,
                clock_in = %session.clock_in,
                anomalies = session.anomalies.len(),
                "Closed session with anomalies"
            );
        }

        WorkSession {
            employee_id: self.employee_id.to_string(),
            clock_in: session.clock_in,
            clock_out: Some(clock_out),
            breaks: session.breaks,
            total_minutes,
            break_minutes,
            worked_minutes,
            is_complete: counted,
            has_anomalies: !session.anomalies.is_empty(),
            anomalies: session.anomalies,
        }
    }

    fn dangling(&self, session: OpenSession) -> WorkSession {
        WorkSession::dangling(
            self.employee_id,
            session.clock_in,
            session.breaks,
            session.anomalies,
        )
    }

    fn run(&self, punches: &[Punch]) -> Vec<WorkSession> {
        let (state, sessions) = punches.iter().fold(
            (SessionState::Idle, Vec::new()),
            |(state, mut sessions), punch| {
                let (next, closed) = self.transition(state, punch);
                sessions.extend(closed);
                (next, sessions)
            },
        );

        sessions.into_iter().chain(self.finish(state)).collect()
    }
}

fn hours_label(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(1)
}

/// Reconstructs work sessions from normalized punches.
///
/// Noise punches are skipped. The remaining punches may belong to several
/// employees; each employee's punches are replayed in timestamp order
/// through the session state machine. Sessions are returned ordered by
/// employee id, then clock in.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{normalize_punches, reconstruct_sessions};
/// use payroll_engine::config::EngineConfig;
/// use payroll_engine::models::{Punch, PunchType};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punch = |id: &str, punch_type, ts| Punch {
///     id: id.into(), employee_id: "emp_001".into(), punch_type, timestamp: at(ts),
/// };
/// let punches = vec![
///     punch("p1", PunchType::ClockIn, "2026-01-12 09:00:00"),
///     punch("p2", PunchType::BreakStart, "2026-01-12 12:00:00"),
///     punch("p3", PunchType::BreakEnd, "2026-01-12 12:30:00"),
///     punch("p4", PunchType::ClockOut, "2026-01-12 17:00:00"),
/// ];
///
/// let config = EngineConfig::default();
/// let sessions = reconstruct_sessions(&normalize_punches(&punches, &config), &config);
/// assert_eq!(sessions.len(), 1);
/// assert_eq!(sessions[0].total_minutes, 480);
/// assert_eq!(sessions[0].worked_minutes, 450);
/// ```
pub fn reconstruct_sessions(processed: &[ProcessedPunch], config: &EngineConfig) -> Vec<WorkSession> {
    let valid: Vec<Punch> = processed
        .iter()
        .filter(|p| !p.is_noise)
        .map(|p| p.punch.clone())
        .collect();

    partition_by_employee(&valid)
        .into_iter()
        .flat_map(|(employee_id, mut punches)| {
            punches.sort_by(|a, b| {
                a.timestamp
                    .cmp(&b.timestamp)
                    .then_with(|| a.id.cmp(&b.id))
            });
            Reconstruction {
                employee_id: &employee_id,
                config,
            }
            .run(&punches)
        })
        .collect()
}
