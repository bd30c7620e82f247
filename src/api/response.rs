//! Response types for the attendance engine API.
//!
//! This module defines the error response structures, the mapping from
//! engine errors to HTTP status codes, and the bodies of responses that are
//! not plain model types.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::config::VersionedPolicy;
use crate::engine::RecalculationReport;
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
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
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
            EngineError::InvalidPolicy { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_POLICY",
                    message,
                    format!("Policy field '{}' is out of range", field),
                ),
            },
            EngineError::InvalidAttendanceSettings { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_ATTENDANCE_SETTINGS", message),
            },
            EngineError::MalformedEvent { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("MALFORMED_EVENT", message),
            },
            EngineError::InvalidDateRange { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_DATE_RANGE", message),
            },
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", message),
            },
            EngineError::LeaveRequestNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("LEAVE_REQUEST_NOT_FOUND", message),
            },
            EngineError::LeaveRequestAlreadyReviewed { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("LEAVE_REQUEST_ALREADY_REVIEWED", message),
            },
            EngineError::PolicyRecalculationFailure { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "RECALCULATION_FAILED",
                    message,
                    "The previous policy and balances remain in effect",
                ),
            },
            EngineError::StoreError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORE_ERROR", "Storage error", message),
            },
        }
    }
}

/// Response body for `PUT /settings/policy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyUpdateResponse {
    /// The newly committed policy version.
    pub policy: VersionedPolicy,
    /// The recalculation that committed it.
    pub recalculation: RecalculationReport,
}
