//! CSV export of a payroll period.

use crate::error::{EngineError, EngineResult};
use crate::models::{CompensationType, PayrollPeriod};

use super::money::{format_dollars, format_hours};

/// Column headers of the payroll export, in order.
pub const PAYROLL_CSV_HEADERS: [&str; 10] = [
    "Employee Name",
    "Position",
    "Hourly Rate",
    "Regular Hours",
    "Overtime Hours",
    "Regular Pay",
    "Overtime Pay",
    "Gross Pay",
    "Tips",
    "Total Pay",
];

/// Renders a payroll period as CSV.
///
/// One row per employee follows the header, then a `TOTAL` row. Amounts are
/// en-US dollars, hours carry two decimals and fields are quoted only when
/// they contain a delimiter, quote or line break. Hourly Rate is blank for
/// salaried and contract staff.
///
/// # Errors
///
/// Returns [`EngineError::ExportError`] if the writer fails.
pub fn export_payroll_csv(period: &PayrollPeriod) -> EngineResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(PAYROLL_CSV_HEADERS).map_err(export_error)?;

    for row in &period.employees {
        let hourly_rate = match row.compensation_type {
            CompensationType::Hourly => format_dollars(row.hourly_rate_cents),
            _ => String::new(),
        };
        writer
            .write_record([
                row.employee_name.clone(),
                row.position.clone(),
                hourly_rate,
                format_hours(row.regular_hours),
                format_hours(row.overtime_hours),
                format_dollars(row.regular_pay_cents),
                format_dollars(row.overtime_pay_cents),
                format_dollars(row.gross_pay_cents),
                format_dollars(row.tips_cents),
                format_dollars(row.total_pay_cents),
            ])
            .map_err(export_error)?;
    }

    writer
        .write_record([
            "TOTAL".to_string(),
            String::new(),
            String::new(),
            format_hours(period.total_regular_hours),
            format_hours(period.total_overtime_hours),
            format_dollars(period.total_regular_pay_cents),
            format_dollars(period.total_overtime_pay_cents),
            format_dollars(period.total_gross_pay_cents),
            format_dollars(period.total_tips_cents),
            format_dollars(period.total_pay_cents),
        ])
        .map_err(export_error)?;

    let bytes = writer.into_inner().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}

fn export_error(err: csv::Error) -> EngineError {
    EngineError::ExportError {
        message: err.to_string(),
    }
}
