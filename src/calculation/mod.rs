//! Calculation logic for the payroll engine.
//!
//! The stages run leaves first: punches are normalized, paired into work
//! sessions, aggregated into weekly hours, priced under the compensation in
//! effect, and finally assembled into a payroll period and its CSV export.
//! Every stage is a pure function of its inputs.

mod compensation;
mod csv_export;
mod hours_aggregator;
mod manual_payment;
mod money;
mod payroll_assembler;
mod proration;
mod punch_normalizer;
mod session_reconstructor;

pub use compensation::{
    CompensationSnapshot, calculate_daily_cost, contractor_daily_amount, daily_cost,
    resolve_compensation_for_date, salary_daily_amount,
};
pub use csv_export::{PAYROLL_CSV_HEADERS, export_payroll_csv};
pub use hours_aggregator::{
    DailyHours, HoursSummary, WeeklyHours, aggregate_hours, sessions_in_range,
    split_weekly_overtime, week_start_for,
};
pub use manual_payment::create_manual_payment;
pub use money::{add_cents, format_dollars, format_hours, round_to_cents};
pub use payroll_assembler::{assemble_payroll_period, calculate_employee_payroll};
pub use proration::{
    calculate_contractor_pay_for_period, calculate_effective_hourly_rate,
    calculate_salary_for_period, effective_hourly_rate, generate_daily_allocations,
};
pub use punch_normalizer::{normalize_punches, partition_by_employee};
pub use session_reconstructor::reconstruct_sessions;
