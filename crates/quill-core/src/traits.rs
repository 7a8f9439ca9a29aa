//! Core traits for quill abstractions.
//!
//! These traits define the interfaces that concrete storage backends
//! must satisfy. Services depend on the traits, not on a backend.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Repository for note persistence.
///
/// Implementations do not validate input; that is the service's job.
/// Every mutating call is a single statement committed immediately.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note, stamping `created_at` and `updated_at` with the same instant.
    async fn create_note(&self, req: CreateNoteRequest) -> Result<Note>;

    /// Point lookup. `Ok(None)` when the id does not exist.
    async fn get_note_by_id(&self, id: i64) -> Result<Option<Note>>;

    /// All notes, newest first (ties by id ascending).
    async fn get_all_notes(&self) -> Result<Vec<Note>>;

    /// Overwrite the provided fields and refresh `updated_at`.
    /// `Ok(None)` when the id does not exist.
    async fn update_note(&self, id: i64, req: UpdateNoteRequest) -> Result<Option<Note>>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete_note(&self, id: i64) -> Result<bool>;

    /// Case-insensitive substring match on title or content, newest first.
    async fn search_notes(&self, term: &str) -> Result<Vec<Note>>;

    /// Case-insensitive substring match on the raw tags string, newest first.
    async fn get_notes_by_tag(&self, tag: &str) -> Result<Vec<Note>>;

    /// Whether a note with this id exists.
    async fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.get_note_by_id(id).await?.is_some())
    }
}

// =============================================================================
// COMMENT REPOSITORY
// =============================================================================

/// Repository for comments attached to notes.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment. The referenced note must exist.
    async fn create(&self, req: CreateCommentRequest) -> Result<Comment>;

    /// Point lookup. `Ok(None)` when the id does not exist.
    async fn get(&self, id: i64) -> Result<Option<Comment>>;

    /// Comments oldest first, optionally restricted to one note.
    async fn list(&self, note_id: Option<i64>) -> Result<Vec<Comment>>;

    /// Replace the comment body. `Ok(None)` when the id does not exist.
    async fn update(&self, id: i64, content: &str) -> Result<Option<Comment>>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool>;
}
