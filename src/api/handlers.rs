//! HTTP request handlers for the schedule resolution API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{EffectiveSchedule, ScheduleAssignment, UnscheduledReason};
use crate::resolution::{ScheduleEngine, ValidationContext};
use crate::store::InMemoryStore;

use super::request::{
    DayResolveRequest, RecordSet, ValidateAssignmentRequest, WeekResolveRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/resolve/day", post(resolve_day_handler))
        .route("/resolve/week", post(resolve_week_handler))
        .route("/assignments/validate", post(validate_handler))
        .with_state(state)
}

/// Maps a JSON extraction rejection to an API error body.
fn rejection_to_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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
    }
}

/// Builds the per-request store: catalog templates and periods plus the
/// employee-specific records carried in the request.
fn build_store(state: &AppState, records: RecordSet) -> Result<InMemoryStore, EngineError> {
    let mut store = state.catalog().build_store();
    for assignment in records.assignments {
        store.add_assignment(assignment.into());
    }
    for absence in records.absences {
        store.add_absence(absence.try_into()?);
    }
    for override_day in records.overrides {
        store.add_override(override_day.try_into()?);
    }
    for manual in records.manual_shifts {
        store.add_manual_shift(manual.try_into()?);
    }
    for slot_id in records.paid_break_slot_ids {
        store.add_paid_break_slot_id(slot_id);
    }
    Ok(store)
}

/// Handler for the POST /resolve/day endpoint.
///
/// Resolves the effective schedule for one employee on one date. A date
/// with no assignment or no pattern returns an unscheduled schedule with
/// status 200, not an error.
async fn resolve_day_handler(
    State(state): State<AppState>,
    payload: Result<Json<DayResolveRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing day resolution request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let store = match build_store(&state, request.records) {
        Ok(store) => store,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid request records");
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    };

    let engine = ScheduleEngine::new(store);
    match engine.resolve_effective_schedule(&request.employee_id, request.date) {
        Ok(schedule) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                date = %request.date,
                source = %schedule.source,
                "Day resolution completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(schedule),
            )
                .into_response()
        }
        Err(err) if err.is_unscheduled() => {
            let reason = match &err {
                EngineError::NoActiveAssignment { .. } => UnscheduledReason::NoAssignment,
                _ => UnscheduledReason::NoPattern,
            };
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                date = %request.date,
                "Day resolved as unscheduled"
            );
            let schedule =
                EffectiveSchedule::unscheduled(request.employee_id, request.date, reason);
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(schedule),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Day resolution failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for the POST /resolve/week endpoint.
///
/// Resolves the seven dates starting at `week_start`. Days without a
/// schedule are recorded as unscheduled inside the week; only store and
/// request errors fail the call.
async fn resolve_week_handler(
    State(state): State<AppState>,
    payload: Result<Json<WeekResolveRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing week resolution request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let store = match build_store(&state, request.records) {
        Ok(store) => store,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid request records");
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    };

    let engine = ScheduleEngine::new(store);
    match engine.resolve_week_schedule(&request.employee_id, request.week_start) {
        Ok(week) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                week_start = %request.week_start,
                total_scheduled_minutes = week.total_scheduled_minutes,
                "Week resolution completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(week),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Week resolution failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for the POST /assignments/validate endpoint.
///
/// Returns the full conflict list with status 200 whenever the request
/// parses; an invalid candidate is data, not an error.
async fn validate_handler(
    State(_state): State<AppState>,
    payload: Result<Json<ValidateAssignmentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing assignment validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let candidate: ScheduleAssignment = request.candidate.into();
    let context = ValidationContext {
        contract: request.contract.into(),
        existing: request.existing.into_iter().map(Into::into).collect(),
    };

    let result = crate::resolution::validate_assignment(&candidate, &context);
    info!(
        correlation_id = %correlation_id,
        candidate_id = %candidate.id,
        valid = result.valid,
        conflicts = result.conflicts.len(),
        "Assignment validation completed"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}
