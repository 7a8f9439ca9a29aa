//! HTTP handlers.
//!
//! Handlers only translate between HTTP and the service layer; every
//! response body is either an [`ApiResponse`](crate::response::ApiResponse)
//! or an [`ApiError`].

pub mod comments;
pub mod health;
pub mod notes;
pub mod tags;

use axum::http::{StatusCode, Uri};
use tracing::debug;

use crate::error::{ApiError, ENDPOINT_NOT_FOUND, METHOD_NOT_ALLOWED};

/// Fallback for every unmatched route.
pub async fn not_found(uri: Uri) -> ApiError {
    debug!(subsystem = "api", path = %uri.path(), "No route matched");
    ApiError::not_found(ENDPOINT_NOT_FOUND)
}

/// Fallback for a known path with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::Rejected(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED.to_string())
}
