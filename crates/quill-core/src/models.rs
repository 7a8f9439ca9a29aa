//! Core data models for quill.
//!
//! These types are shared across all quill crates and represent
//! the core domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A persisted note.
///
/// `tags` is a free-form comma-separated string; tokens are not normalized
/// or deduplicated on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Split the raw tag string into trimmed, non-empty tokens.
    pub fn tag_tokens(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Fields for a note insert. Values are stored as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    pub tags: Option<String>,
}

/// Partial update of a note. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
}

impl UpdateNoteRequest {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }
}

/// Which notes a list call returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NoteQuery {
    /// Every note, newest first.
    #[default]
    All,
    /// Case-insensitive substring match on title or content.
    Search(String),
    /// Case-insensitive substring match on the raw tags string.
    Tag(String),
}

impl NoteQuery {
    /// Build a query from optional `search` and `tag` parameters.
    ///
    /// `search` wins when both are given. Empty values count as absent.
    pub fn from_params(search: Option<String>, tag: Option<String>) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        match (non_empty(search), non_empty(tag)) {
            (Some(term), _) => NoteQuery::Search(term),
            (None, Some(tag)) => NoteQuery::Tag(tag),
            (None, None) => NoteQuery::All,
        }
    }
}

// =============================================================================
// COMMENT TYPES
// =============================================================================

/// A comment attached to a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub note_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a comment insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    pub note_id: i64,
    pub content: String,
}
