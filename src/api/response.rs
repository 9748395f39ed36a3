//! Response types for the payroll engine API.
//!
//! This module defines the success bodies that are not plain engine models,
//! the error body, and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{ProcessedPunch, WorkSession};

/// Response body for `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsResponse {
    /// Every input punch with its noise flag.
    pub processed_punches: Vec<ProcessedPunch>,
    /// Reconstructed sessions, grouped by employee.
    pub sessions: Vec<WorkSession>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::MissingHoursWorked { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "MISSING_HOURS_WORKED",
                    message,
                    "Hourly costs need the hours worked on the day",
                ),
            ),
            EngineError::MissingCompensationField { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "MISSING_COMPENSATION_FIELD",
                    message,
                    "Add the field to the compensation history entry or the current terms",
                ),
            ),
            EngineError::InvalidManualPayment { field, .. } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_MANUAL_PAYMENT",
                    message,
                    format!("Field '{}' failed validation", field),
                ))
            }
            EngineError::InvalidEffectiveRateQuery { .. } => ApiErrorResponse::bad_request(
                ApiError::new("INVALID_EFFECTIVE_RATE_QUERY", message),
            ),
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
            EngineError::ExportError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}
