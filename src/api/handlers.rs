//! HTTP request handlers for the Ponto Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
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

use crate::batch::{EmployeeMonthJob, process_batch};
use crate::calculation::build_month_report;

use super::request::{BatchCalculationRequest, MonthlyCalculationRequest, validate_job};
use super::response::{
    ApiError, ApiErrorResponse, BatchCalculationResponse, MonthlyCalculationResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate/monthly", post(monthly_handler))
        .route("/calculate/batch", post(batch_handler))
        .with_state(state)
}

/// Handler for POST /calculate/monthly.
///
/// Runs the full pipeline for one employee-month and returns the results
/// together with their display views.
async fn monthly_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyCalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly calculation request");

    let job: EmployeeMonthJob = match payload {
        Ok(Json(request)) => request.into(),
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(response) = validate(correlation_id, &job) {
        return response;
    }

    let start_time = Instant::now();
    let report = build_month_report(
        &job.employee_id,
        job.year,
        job.month,
        &job.records,
        state.policy(),
        job.base_salary,
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %job.employee_id,
        records_count = job.records.len(),
        work_days = report.monthly.counters.work_days,
        final_salary = %report.salary.final_salary,
        warnings = report.monthly.diagnostics.warnings.len(),
        errors = report.monthly.diagnostics.errors.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Monthly calculation completed"
    );

    json_response(StatusCode::OK, MonthlyCalculationResponse::from(report))
}

/// Sets the batch's cancel flag when dropped.
///
/// Axum drops the handler future when the client disconnects, so employees
/// not yet started are skipped.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Handler for POST /calculate/batch.
///
/// Validates every job, then calculates them in parallel on the blocking
/// thread pool.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch calculation request");

    let jobs = match payload {
        Ok(Json(request)) => request.jobs,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    for job in &jobs {
        if let Err(response) = validate(correlation_id, job) {
            return response;
        }
    }

    let job_count = jobs.len();
    let policy = state.policy_handle();
    let cancel = Arc::new(AtomicBool::new(false));
    let guard = CancelOnDrop(Arc::clone(&cancel));

    let result =
        tokio::task::spawn_blocking(move || process_batch(jobs, &policy, &cancel)).await;
    drop(guard);

    match result {
        Ok(outcomes) => {
            info!(
                correlation_id = %correlation_id,
                jobs = job_count,
                "Batch calculation completed"
            );
            json_response(StatusCode::OK, BatchCalculationResponse { outcomes })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Batch calculation failed"
            );
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::calculation_failed(err.to_string()),
            )
        }
    }
}

/// Validates a job, logging and converting a rejection into a response.
fn validate(correlation_id: Uuid, job: &EmployeeMonthJob) -> Result<(), Response> {
    validate_job(job).map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            employee_id = %job.employee_id,
            error = %err,
            "Invalid calculation request"
        );
        let api_error: ApiErrorResponse = err.into();
        json_response(api_error.status, api_error.error)
    })
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
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

    json_response(StatusCode::BAD_REQUEST, error)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
