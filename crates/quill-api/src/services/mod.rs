//! Service layer for business logic.

pub mod comment_service;
pub mod note_service;

pub use comment_service::{CommentPayload, CommentService};
pub use note_service::{NotePayload, NoteService};
