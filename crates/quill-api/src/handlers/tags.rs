use axum::extract::State;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;

/// `GET /api/tags`: every distinct tag token, sorted.
pub async fn list_tags(State(state): State<AppState>) -> Result<ApiResponse<Vec<String>>, ApiError> {
    Ok(ApiResponse::ok(state.notes.all_tags().await?))
}
