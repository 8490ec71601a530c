//! Response envelope and error mapping
//!
//! Every endpoint answers `{success, message, data}` on success and
//! `{success: false, message, error}` on failure, with a machine-checkable
//! `error.kind` the caller can branch on without parsing messages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use claimflow_engine::{ErrorKind, WorkflowError};
use serde::Serialize;
use serde_json::json;

/// 200 envelope
pub(crate) fn ok(message: &str, data: impl Serialize) -> Response {
    envelope(StatusCode::OK, message, data)
}

/// 201 envelope
pub(crate) fn created(message: &str, data: impl Serialize) -> Response {
    envelope(StatusCode::CREATED, message, data)
}

fn envelope(status: StatusCode, message: &str, data: impl Serialize) -> Response {
    (
        status,
        Json(json!({
            "success": true,
            "message": message,
            "data": data,
        })),
    )
        .into_response()
}

/// Workflow error carried out of a handler with `?`
pub(crate) struct ApiError(pub(crate) WorkflowError);

impl From<WorkflowError> for ApiError {
    fn from(value: WorkflowError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind());
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }

        let mut body = json!({
            "success": false,
            "message": err.to_string(),
            "error": { "kind": err.kind() },
        });
        if let WorkflowError::Validation(ref fields) = err {
            body["error"]["fields"] = json!(fields);
        }
        (status, Json(body)).into_response()
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::NoSurveyorAvailable | ErrorKind::InvalidState => StatusCode::CONFLICT,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
        ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::NoSurveyorAvailable), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorKind::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_for(ErrorKind::PreconditionFailed),
            StatusCode::PRECONDITION_FAILED
        );
        assert_eq!(
            status_for(ErrorKind::Persistence),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
