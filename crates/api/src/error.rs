//! API error type with HTTP response mapping.
//!
//! Workflow rejections carry an [`ErrorKind`]; the status code is derived
//! from the kind alone.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::ValidationErrors;
use serde::Serialize;
use thiserror::Error;
use workflow::{ConfigurationError, DispatchError, ErrorKind, PortError, WorkflowError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path or body values that failed validation before dispatch.
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),

    /// A workflow rejected the request.
    #[error("{message}")]
    Rejected { kind: ErrorKind, message: String },

    /// A port failed in a way the workflow could not express.
    #[error("{0}")]
    Fault(PortError),

    /// No workflow is registered for the request type.
    #[error("{0}")]
    Unhandled(ConfigurationError),
}

/// Maps an error kind to its HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Precondition => StatusCode::PRECONDITION_FAILED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    messages: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Invalid(errors) => (
                StatusCode::PRECONDITION_FAILED,
                ErrorBody {
                    error: ErrorKind::Precondition.as_str(),
                    messages: errors.messages().into_iter().map(str::to_string).collect(),
                },
            ),
            ApiError::Rejected { kind, message } => (
                status_for(kind),
                ErrorBody {
                    error: kind.as_str(),
                    messages: message.lines().map(str::to_string).collect(),
                },
            ),
            ApiError::Fault(error) => {
                tracing::error!(error = %error, "workflow fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "fault",
                        messages: vec!["Internal server error".to_string()],
                    },
                )
            }
            ApiError::Unhandled(error) => (
                StatusCode::NOT_IMPLEMENTED,
                ErrorBody {
                    error: "unhandled",
                    messages: vec![error.to_string()],
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl<E: WorkflowError> From<DispatchError<E>> for ApiError {
    fn from(error: DispatchError<E>) -> Self {
        match error {
            DispatchError::Rejected(rejection) => ApiError::Rejected {
                kind: rejection.kind(),
                message: rejection.explanation(),
            },
            DispatchError::Fault(fault) => ApiError::Fault(fault),
            DispatchError::Unhandled(missing) => ApiError::Unhandled(missing),
        }
    }
}
