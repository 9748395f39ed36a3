//! Time-punch reconciliation and payroll computation engine.
//!
//! This crate turns raw, noisy employee clock punches into validated work
//! sessions, splits worked time into regular and overtime hours, and prices
//! hours, salaries and contractor terms into integer-cent payroll amounts,
//! daily labor allocations and a CSV export.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
