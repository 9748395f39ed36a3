//! HTTP API module for the payroll engine.
//!
//! This module exposes session reconstruction, daily allocations, manual
//! payments and payroll assembly as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AllocationsRequest, ManualPaymentRequest, PayrollRequest, SessionsRequest};
pub use response::{ApiError, ApiErrorResponse, SessionsResponse};
pub use state::AppState;
