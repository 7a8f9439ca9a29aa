//! Note endpoints under `/api/notes`.

use axum::extract::State;
use quill_core::{Note, NoteQuery};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::{parse_payload, IdPath, JsonPayload, QueryParams, RawBody};
use crate::response::ApiResponse;
use crate::services::NotePayload;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListNotesParams {
    pub search: Option<String>,
    pub tag: Option<String>,
}

/// `GET /api/notes?search=&tag=`
pub async fn list_notes(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListNotesParams>,
) -> Result<ApiResponse<Vec<Note>>, ApiError> {
    let query = NoteQuery::from_params(params.search, params.tag);
    let notes = state.notes.list(query).await?;
    Ok(ApiResponse::list(notes))
}

/// `GET /api/notes/:id`
pub async fn get_note(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<ApiResponse<Note>, ApiError> {
    Ok(ApiResponse::ok(state.notes.get(id).await?))
}

/// `POST /api/notes`
pub async fn create_note(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<NotePayload>,
) -> Result<ApiResponse<Note>, ApiError> {
    let note = state.notes.create(payload).await?;
    Ok(ApiResponse::created(note).with_message("Note created successfully"))
}

/// `PUT /api/notes/:id`
///
/// An unknown id is answered with 404 before the body is looked at.
pub async fn update_note(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    RawBody(body): RawBody,
) -> Result<ApiResponse<Note>, ApiError> {
    state.notes.get(id).await?;
    let payload: NotePayload = parse_payload(&body)?;
    let note = state.notes.update(id, payload).await?;
    Ok(ApiResponse::ok(note).with_message("Note updated successfully"))
}

/// `DELETE /api/notes/:id`
pub async fn delete_note(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<ApiResponse<()>, ApiError> {
    state.notes.delete(id).await?;
    Ok(ApiResponse::message("Note deleted successfully"))
}
