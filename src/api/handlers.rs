//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::AttendanceSettings;
use crate::error::EngineError;
use crate::models::ReviewDecision;

use super::request::{
    DailySummaryQuery, LeaveListQuery, LeaveRequestBody, LeaveStatisticsQuery, PeriodSummaryQuery,
    PolicyUpdateRequest, ReviewRequest,
};
use super::response::{ApiError, ApiErrorResponse, PolicyUpdateResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/attendance/daily-summary/:employee_id",
            get(daily_summary_handler),
        )
        .route("/attendance/summary", get(period_summary_handler))
        .route("/leave/balance/:employee_id", get(balance_handler))
        .route(
            "/leave/requests",
            get(list_leave_handler).post(submit_leave_handler),
        )
        .route("/leave/requests/:id", get(get_leave_handler))
        .route("/leave/requests/:id/approve", post(approve_handler))
        .route("/leave/requests/:id/reject", post(reject_handler))
        .route(
            "/settings/policy",
            get(get_policy_handler).put(update_policy_handler),
        )
        .route("/settings/recalculate-balances", post(recalculate_handler))
        .route("/leave/statistics", get(leave_statistics_handler))
        .route(
            "/settings/attendance",
            get(attendance_settings_handler).put(update_attendance_settings_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Logs an engine error and converts it to a response.
fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    let api_error: ApiErrorResponse = err.into();
    if api_error.status.is_server_error() {
        error!(
            correlation_id = %correlation_id,
            code = %api_error.error.code,
            error = %api_error.error.message,
            "Request failed"
        );
    } else {
        warn!(
            correlation_id = %correlation_id,
            code = %api_error.error.code,
            error = %api_error.error.message,
            "Request rejected"
        );
    }
    api_error.into_response()
}

/// Converts a JSON body rejection into a 400 response.
fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
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
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection_response(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid query string");
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

fn path_rejection_response(correlation_id: Uuid, rejection: PathRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid path parameter");
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

/// Handler for GET /attendance/daily-summary/:employee_id.
async fn daily_summary_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<DailySummaryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    let engine = state.engine();
    let date = query.date.unwrap_or_else(|| engine.today());
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        date = %date,
        "Processing daily summary request"
    );

    let start_time = Instant::now();
    match engine.get_daily_summary(&employee_id, date) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                status = %summary.status,
                worked_hours = %summary.worked_hours,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Daily summary computed"
            );
            json_response(StatusCode::OK, summary)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /attendance/summary.
async fn period_summary_handler(
    State(state): State<AppState>,
    query: Result<Query<PeriodSummaryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %query.employee_id,
        start_date = %query.start_date,
        end_date = %query.end_date,
        "Processing period summary request"
    );

    let start_time = Instant::now();
    match state
        .engine()
        .get_period_summary(&query.employee_id, query.start_date, query.end_date)
    {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %query.employee_id,
                total_days = summary.totals.total_days,
                worked_hours = %summary.totals.worked_hours,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Period summary computed"
            );
            json_response(StatusCode::OK, summary)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /leave/balance/:employee_id.
async fn balance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing leave balance request"
    );

    match state.engine().get_balance(&employee_id) {
        Ok(balance) => json_response(StatusCode::OK, balance),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /leave/requests.
///
/// Returns 201 with the created request. Insufficient balance is reported
/// through the request's flags, not as an error.
async fn submit_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveRequestBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave request submission");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    match state.engine().submit_leave_request(body.into()) {
        Ok(request) => {
            info!(
                correlation_id = %correlation_id,
                request_id = %request.id,
                insufficient_balance = request.insufficient_balance,
                "Leave request created"
            );
            json_response(StatusCode::CREATED, request)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /leave/requests.
async fn list_leave_handler(
    State(state): State<AppState>,
    query: Result<Query<LeaveListQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = ?query.employee_id,
        status = ?query.status,
        "Processing leave request listing"
    );

    match state
        .engine()
        .list_leave_requests(query.employee_id.as_deref(), query.status)
    {
        Ok(requests) => json_response(StatusCode::OK, requests),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /leave/requests/:id.
async fn get_leave_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };

    match state.engine().get_leave_request(id) {
        Ok(request) => json_response(StatusCode::OK, request),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /leave/statistics.
async fn leave_statistics_handler(
    State(state): State<AppState>,
    query: Result<Query<LeaveStatisticsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(correlation_id, rejection),
    };

    match state
        .engine()
        .leave_statistics(query.employee_id.as_deref())
    {
        Ok(stats) => json_response(StatusCode::OK, stats),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /leave/requests/:id/approve.
async fn approve_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Response {
    review(state, id, payload, ReviewDecision::Approve)
}

/// Handler for POST /leave/requests/:id/reject.
async fn reject_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Response {
    review(state, id, payload, ReviewDecision::Reject)
}

fn review(
    state: AppState,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
    decision: ReviewDecision,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        request_id = %id,
        decision = ?decision,
        reviewer = %body.reviewer,
        "Processing leave review"
    );

    match state
        .engine()
        .review_leave_request(id, decision, &body.reviewer, body.comment)
    {
        Ok(request) => json_response(StatusCode::OK, request),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /settings/policy.
async fn get_policy_handler(State(state): State<AppState>) -> Response {
    let policy = state.engine().policy();
    json_response(StatusCode::OK, policy.as_ref())
}

/// Handler for PUT /settings/policy.
///
/// Commits a new policy version and recalculates every balance under it
/// before responding.
async fn update_policy_handler(
    State(state): State<AppState>,
    payload: Result<Json<PolicyUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let engine = state.engine();
    let settings = update.apply_to(&engine.policy().settings);
    info!(
        correlation_id = %correlation_id,
        monthly_vacation_days = %settings.monthly_vacation_days,
        probation_period_months = settings.probation_period_months,
        include_weekends = settings.include_weekends,
        max_consecutive_days = settings.max_consecutive_days,
        "Processing policy update"
    );

    match engine.update_policy_settings(settings) {
        Ok(recalculation) => {
            let response = PolicyUpdateResponse {
                policy: engine.policy().as_ref().clone(),
                recalculation,
            };
            json_response(StatusCode::OK, response)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /settings/recalculate-balances.
async fn recalculate_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing balance recalculation");

    match state.engine().recalculate_balances() {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /settings/attendance.
async fn attendance_settings_handler(State(state): State<AppState>) -> Response {
    let settings = state.engine().attendance_settings();
    json_response(StatusCode::OK, settings.as_ref())
}

/// Handler for PUT /settings/attendance.
///
/// Replaces the working-hours settings. Omitted fields take their defaults.
async fn update_attendance_settings_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceSettings>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let settings = match payload {
        Ok(Json(settings)) => settings,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, "Processing attendance settings update");

    match state.engine().update_attendance_settings(settings) {
        Ok(settings) => json_response(StatusCode::OK, settings.as_ref()),
        Err(err) => engine_error_response(correlation_id, err),
    }
}
