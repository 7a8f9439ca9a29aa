//! # quill-api
//!
//! HTTP JSON API for quill notes and comments.
//!
//! [`create_router`] builds the application routes with state attached;
//! the binary wraps it in tracing, request-id, CORS and body-limit layers.
//! Tests drive the bare router directly.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod services;

use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use quill_db::{Database, SqliteCommentRepository, SqliteNoteRepository};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

pub use config::ServerConfig;
pub use error::ApiError;
pub use response::ApiResponse;
pub use services::{CommentService, NoteService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub notes: NoteService<SqliteNoteRepository>,
    pub comments: CommentService<SqliteCommentRepository, SqliteNoteRepository>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            notes: NoteService::new(db.notes.clone()),
            comments: CommentService::new(db.comments.clone(), db.notes.clone()),
            db,
        }
    }
}

/// Application routes, without transport middleware.
pub fn create_router(state: AppState) -> Router {
    use handlers::{comments, health, notes, tags};

    let api = Router::new()
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/:id",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route("/tags", get(tags::list_tags))
        .route(
            "/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/comments/:id",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .method_not_allowed_fallback(handlers::method_not_allowed);

    Router::new()
        .route("/health", get(health::health_check))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(subsystem = "api", panic = detail, "Handler panicked");
    ApiError::Internal(quill_core::Error::Internal(detail.to_string())).into_response()
}
