//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_hours, assemble_payroll_period, create_manual_payment, export_payroll_csv,
    generate_daily_allocations, normalize_punches, reconstruct_sessions, sessions_in_range,
};
use crate::models::{AnomalyCode, Punch};

use super::request::{AllocationsRequest, ManualPaymentRequest, PayrollRequest, SessionsRequest};
use super::response::{ApiError, ApiErrorResponse, SessionsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/sessions", post(sessions_handler))
        .route("/allocations", post(allocations_handler))
        .route("/allocations/manual", post(manual_payment_handler))
        .route("/payroll", post(payroll_handler))
        .route("/payroll/csv", post(payroll_csv_handler))
        .with_state(state)
}

/// Handler for POST /sessions.
///
/// Normalizes the punches and reconstructs work sessions for every employee
/// present in the request.
async fn sessions_handler(
    State(state): State<AppState>,
    payload: Result<Json<SessionsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing sessions request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let processed_punches = normalize_punches(&request.punches, state.config());
    let sessions = reconstruct_sessions(&processed_punches, state.config());

    info!(
        correlation_id = %correlation_id,
        punches_count = request.punches.len(),
        noise_count = processed_punches.iter().filter(|p| p.is_noise).count(),
        sessions_count = sessions.len(),
        anomalous_sessions = sessions.iter().filter(|s| s.has_anomalies).count(),
        duration_us = start_time.elapsed().as_micros(),
        "Sessions reconstructed"
    );

    json_response(SessionsResponse {
        processed_punches,
        sessions,
    })
}

/// Handler for POST /allocations.
///
/// Produces one daily labor allocation per employed day of the range.
async fn allocations_handler(
    State(state): State<AppState>,
    payload: Result<Json<AllocationsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allocations request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let period = match request.period() {
        Ok(period) => period,
        Err(error) => return rejected(correlation_id, ApiErrorResponse::bad_request(error)),
    };

    let start_time = Instant::now();
    let config = state.config();
    let own_punches: Vec<Punch> = request
        .punches
        .iter()
        .filter(|p| p.employee_id == request.employee.id)
        .cloned()
        .collect();
    let sessions = reconstruct_sessions(&normalize_punches(&own_punches, config), config);
    let hours = aggregate_hours(&sessions_in_range(&sessions, &period), config);

    match generate_daily_allocations(
        &request.employee,
        &request.restaurant_id,
        period.start_date,
        period.end_date,
        &hours,
        config,
    ) {
        Ok(allocations) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee.id,
                allocations_count = allocations.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Allocations generated"
            );
            json_response(allocations)
        }
        Err(err) => rejected(correlation_id, err.into()),
    }
}

/// Handler for POST /allocations/manual.
async fn manual_payment_handler(
    payload: Result<Json<ManualPaymentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing manual payment request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match create_manual_payment(
        &request.employee_id,
        &request.restaurant_id,
        &request.date,
        request.amount_cents,
        request.description.as_deref(),
    ) {
        Ok(allocation) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %allocation.employee_id,
                amount_cents = allocation.allocated_amount_cents,
                "Manual payment recorded"
            );
            json_response(allocation)
        }
        Err(err) => rejected(correlation_id, err.into()),
    }
}

/// Handler for POST /payroll.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let period = match request.period() {
        Ok(period) => period,
        Err(error) => return rejected(correlation_id, ApiErrorResponse::bad_request(error)),
    };

    let start_time = Instant::now();
    let payroll = assemble_payroll_period(
        &request.restaurant_id,
        &period,
        &request.employees,
        &request.punches,
        &request.tips,
        state.config(),
    );

    info!(
        correlation_id = %correlation_id,
        restaurant_id = %payroll.restaurant_id,
        employees_count = payroll.employees.len(),
        errors_count = payroll.errors.len(),
        missing_clock_outs = payroll
            .employees
            .iter()
            .flat_map(|e| &e.incomplete_shifts)
            .filter(|s| s.anomalies.iter().any(|a| a.code == AnomalyCode::MissingClockOut))
            .count(),
        total_pay_cents = payroll.total_pay_cents,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll completed"
    );

    json_response(payroll)
}

/// Handler for POST /payroll/csv.
///
/// Same input as `/payroll`; responds with the CSV export.
async fn payroll_csv_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll export request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let period = match request.period() {
        Ok(period) => period,
        Err(error) => return rejected(correlation_id, ApiErrorResponse::bad_request(error)),
    };

    let start_time = Instant::now();
    let payroll = assemble_payroll_period(
        &request.restaurant_id,
        &period,
        &request.employees,
        &request.punches,
        &request.tips,
        state.config(),
    );

    match export_payroll_csv(&payroll) {
        Ok(csv) => {
            info!(
                correlation_id = %correlation_id,
                rows = payroll.employees.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Payroll exported"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
                csv,
            )
                .into_response()
        }
        Err(err) => rejected(correlation_id, err.into()),
    }
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(error_response(ApiErrorResponse::bad_request(error)))
}

fn rejected(correlation_id: Uuid, response: ApiErrorResponse) -> Response {
    warn!(
        correlation_id = %correlation_id,
        status = response.status.as_u16(),
        code = %response.error.code,
        error = %response.error.message,
        "Request failed"
    );
    error_response(response)
}

fn error_response(response: ApiErrorResponse) -> Response {
    (
        response.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response.error),
    )
        .into_response()
}

fn json_response<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
