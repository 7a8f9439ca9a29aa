//! Comment endpoints under `/api/comments`.

use axum::extract::State;
use quill_core::Comment;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::{IdPath, JsonPayload, QueryParams};
use crate::response::ApiResponse;
use crate::services::CommentPayload;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListCommentsParams {
    pub note_id: Option<String>,
}

impl ListCommentsParams {
    fn note_id(&self) -> Result<Option<i64>, ApiError> {
        match self.note_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ApiError::bad_request("note_id must be an integer")),
        }
    }
}

/// `GET /api/comments?note_id=`
pub async fn list_comments(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListCommentsParams>,
) -> Result<ApiResponse<Vec<Comment>>, ApiError> {
    let comments = state.comments.list(params.note_id()?).await?;
    Ok(ApiResponse::list(comments))
}

/// `GET /api/comments/:id`
pub async fn get_comment(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<ApiResponse<Comment>, ApiError> {
    Ok(ApiResponse::ok(state.comments.get(id).await?))
}

/// `POST /api/comments`
pub async fn create_comment(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<CommentPayload>,
) -> Result<ApiResponse<Comment>, ApiError> {
    let comment = state.comments.create(payload).await?;
    Ok(ApiResponse::created(comment).with_message("Comment created successfully"))
}

/// `PUT /api/comments/:id`
pub async fn update_comment(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonPayload(payload): JsonPayload<CommentPayload>,
) -> Result<ApiResponse<Comment>, ApiError> {
    let comment = state.comments.update(id, payload).await?;
    Ok(ApiResponse::ok(comment).with_message("Comment updated successfully"))
}

/// `DELETE /api/comments/:id`
pub async fn delete_comment(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<ApiResponse<()>, ApiError> {
    state.comments.delete(id).await?;
    Ok(ApiResponse::message("Comment deleted successfully"))
}
