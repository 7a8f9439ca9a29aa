//! API error type and its JSON envelope rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Generic body for unexpected failures; the detail only goes to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message for unmatched routes and non-integer path ids.
pub const ENDPOINT_NOT_FOUND: &str = "Endpoint not found";

/// Message for a known path hit with an unsupported method.
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

#[derive(Debug)]
pub enum ApiError {
    /// Unexpected failure (storage, migration, I/O). Rendered as a bare 500.
    Internal(quill_core::Error),
    NotFound(String),
    BadRequest(String),
    /// Field-level validation messages, rendered under `errors`.
    Validation(Vec<String>),
    /// Transport-level rejection that keeps its own status, e.g. 405 or 413.
    Rejected(StatusCode, String),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected(status, _) => *status,
        }
    }
}

impl From<quill_core::Error> for ApiError {
    fn from(err: quill_core::Error) -> Self {
        use quill_core::Error;
        match err {
            Error::NoteNotFound(_) => ApiError::NotFound("Note not found".to_string()),
            Error::CommentNotFound(_) => ApiError::NotFound("Comment not found".to_string()),
            Error::Validation(errors) => ApiError::Validation(errors),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Internal(err) => {
                error!(
                    subsystem = "api",
                    error = %err,
                    "Request failed with internal error"
                );
                json!({ "success": false, "error": INTERNAL_ERROR_MESSAGE })
            }
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Rejected(_, msg) => {
                json!({ "success": false, "error": msg })
            }
            ApiError::Validation(errors) => json!({ "success": false, "errors": errors }),
        };

        (status, Json(body)).into_response()
    }
}
