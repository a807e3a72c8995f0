//! Uniform JSON envelope for every response.

use crate::task::domain::TaskDomainError;
use crate::task::services::{TaskErrorKind, TaskLifecycleError};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Code reported by successful responses.
pub const SUCCESS_CODE: u32 = 0;

/// Code reported when a known route is called with an unsupported method.
pub const METHOD_NOT_ALLOWED_CODE: u32 = 40_501;

/// Response body shared by successes and failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Zero on success, otherwise the domain error code.
    pub code: u32,
    /// Human-readable outcome.
    pub message: String,
    /// Operation payload, `null` on failure.
    pub data: Option<T>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in a `200 OK` success envelope.
    #[must_use]
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            code: SUCCESS_CODE,
            message: message.into(),
            data: Some(data),
            status: StatusCode::OK,
        }
    }

    /// Wraps a payload in a `201 Created` success envelope.
    #[must_use]
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(message, data)
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope without a payload.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: SUCCESS_CODE,
            message: message.into(),
            data: None,
            status: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Failure rendered through the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    code: u32,
    message: String,
}

impl ApiError {
    /// Builds a validation failure for malformed input.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::from_kind(TaskErrorKind::Validation, message)
    }

    /// Builds a not-found failure for an unknown route.
    #[must_use]
    pub fn route_not_found() -> Self {
        Self::from_kind(TaskErrorKind::NotFound, "route not found")
    }

    /// Builds a failure for a known route called with the wrong method.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            code: METHOD_NOT_ALLOWED_CODE,
            message: "method not allowed".to_owned(),
        }
    }

    fn from_kind(kind: TaskErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: status_for(kind),
            code: kind.code(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the domain error code.
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.code
    }
}

const fn status_for(kind: TaskErrorKind) -> StatusCode {
    match kind {
        TaskErrorKind::Validation => StatusCode::BAD_REQUEST,
        TaskErrorKind::NotFound => StatusCode::NOT_FOUND,
        TaskErrorKind::PreconditionFailed => StatusCode::CONFLICT,
        TaskErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        let kind = err.kind();
        // Storage details stay in the logs.
        let message = match kind {
            TaskErrorKind::Storage => "storage failure".to_owned(),
            _ => err.to_string(),
        };
        Self::from_kind(kind, message)
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()> {
            success: false,
            code: self.code,
            message: self.message,
            data: None,
            status: self.status,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Result type returned by handlers.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;
