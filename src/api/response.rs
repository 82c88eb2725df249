//! Response types for the schedule resolution API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidTimeFormat { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_TIME_FORMAT",
                    format!("Invalid clock time '{}'", value),
                    "Clock times must use the HH:mm format, up to 24:00",
                ),
            },
            EngineError::InvalidSlot { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SLOT",
                    "Invalid time slot",
                    message,
                ),
            },
            EngineError::InvalidPattern { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PATTERN",
                    "Invalid work day pattern",
                    message,
                ),
            },
            EngineError::InvalidAssignment { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_ASSIGNMENT",
                    "Invalid schedule assignment",
                    message,
                ),
            },
            EngineError::InvalidDateRange { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_DATE_RANGE",
                    "Invalid date range",
                    message,
                ),
            },
            EngineError::NoActiveAssignment { employee_id, date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "NO_ACTIVE_ASSIGNMENT",
                    format!(
                        "No active schedule assignment for employee '{}' on {}",
                        employee_id, date
                    ),
                    "The employee has no schedule assignment valid on the requested date",
                ),
            },
            EngineError::NoPatternForDate { date, day_index } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "NO_PATTERN_FOR_DATE",
                    format!("No work day pattern for {}", date),
                    format!("No pattern is registered for day index {}", day_index),
                ),
            },
            EngineError::TemplateNotFound { template_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "TEMPLATE_NOT_FOUND",
                    format!("Schedule template not found: {}", template_id),
                    "The referenced template is not defined by the loaded catalog",
                ),
            },
            EngineError::CatalogNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CATALOG_ERROR",
                    "Catalog error",
                    format!("Catalog file not found: {}", path),
                ),
            },
            EngineError::CatalogParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CATALOG_ERROR",
                    "Catalog parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::DataAccess { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "DATA_ACCESS_ERROR",
                    "Data access failed",
                    message,
                ),
            },
        }
    }
}
