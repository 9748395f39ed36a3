//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allocation;
mod employee;
mod pay_period;
mod payroll;
mod punch;
mod session;

pub use allocation::DailyLaborAllocation;
pub use employee::{
    CompensationHistoryEntry, CompensationTerms, CompensationType, ContractorInterval, Employee,
    PayPeriodType,
};
pub use pay_period::PayPeriod;
pub use payroll::{EmployeePayroll, IncompleteShift, PayrollError, PayrollPeriod};
pub use punch::{NoiseReason, ProcessedPunch, Punch, PunchType};
pub use session::{AnomalyCode, BreakPeriod, SessionAnomaly, WorkSession};
