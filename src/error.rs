//! Error types for the payroll engine.
//!
//! Data-quality problems in punch streams are never errors; they are recorded
//! as anomalies on the affected session. The variants here cover input-contract
//! violations and configuration problems only.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::MissingHoursWorked {
///     employee_id: "emp_001".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Hours worked are required to cost hourly employee 'emp_001'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot work with.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// An hourly cost was requested without the hours worked.
    #[error("Hours worked are required to cost hourly employee '{employee_id}'")]
    MissingHoursWorked {
        /// The employee being costed.
        employee_id: String,
    },

    /// A resolved compensation snapshot lacks a field its type requires.
    #[error("Employee '{employee_id}' has no {field} in effect on {date}")]
    MissingCompensationField {
        /// The employee being resolved.
        employee_id: String,
        /// The missing field.
        field: String,
        /// The date the snapshot was resolved for.
        date: NaiveDate,
    },

    /// A manual per-job payment failed validation.
    #[error("Invalid manual payment field '{field}': {message}")]
    InvalidManualPayment {
        /// The field that failed validation.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// An effective hourly rate was requested with unusable inputs.
    #[error("Cannot derive effective hourly rate: {message}")]
    InvalidEffectiveRateQuery {
        /// A description of the problem.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// The CSV export could not be written.
    #[error("Export error: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
