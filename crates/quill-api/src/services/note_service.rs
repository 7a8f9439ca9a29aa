//! Note business rules: validation, normalization and existence checks.
//!
//! The store never validates; every rule about what a well-formed note is
//! lives here, between the handlers and the [`NoteRepository`].

use std::time::Instant;

use quill_core::{
    collect_unique_tags, CreateNoteRequest, Error, Note, NoteQuery, NoteRepository, Result,
    UpdateNoteRequest,
};
use serde::Deserialize;
use tracing::{debug, info};

/// Note fields as sent by a client. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotePayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

#[derive(Clone)]
pub struct NoteService<R> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Required-field check for creation.
    ///
    /// Returns one message per missing or blank field, title first.
    pub fn validate(title: Option<&str>, content: Option<&str>) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank(title) {
            errors.push("Title is required".to_string());
        }
        if is_blank(content) {
            errors.push("Content is required".to_string());
        }
        errors
    }

    pub async fn create(&self, payload: NotePayload) -> Result<Note> {
        let errors = Self::validate(payload.title.as_deref(), payload.content.as_deref());
        if !errors.is_empty() {
            debug!(subsystem = "api", component = "notes", op = "create", ?errors, "Rejected note");
            return Err(Error::Validation(errors));
        }

        // An empty tags string on create means "no tags".
        let req = CreateNoteRequest {
            title: trimmed(payload.title),
            content: trimmed(payload.content),
            tags: payload
                .tags
                .filter(|t| !t.is_empty())
                .map(|t| t.trim().to_string()),
        };
        let note = self.repo.create_note(req).await?;
        info!(subsystem = "api", component = "notes", op = "create", note_id = note.id, "Note created");
        Ok(note)
    }

    pub async fn get(&self, id: i64) -> Result<Note> {
        self.repo
            .get_note_by_id(id)
            .await?
            .ok_or(Error::NoteNotFound(id))
    }

    pub async fn list(&self, query: NoteQuery) -> Result<Vec<Note>> {
        let start = Instant::now();
        let notes = match &query {
            NoteQuery::All => self.repo.get_all_notes().await?,
            NoteQuery::Search(term) => self.repo.search_notes(term).await?,
            NoteQuery::Tag(tag) => self.repo.get_notes_by_tag(tag).await?,
        };
        debug!(
            subsystem = "api",
            component = "notes",
            op = "list",
            ?query,
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );
        Ok(notes)
    }

    /// Apply a partial update.
    ///
    /// Any provided title or content must be non-blank; a single bad field
    /// rejects the whole update and nothing is written.
    pub async fn update(&self, id: i64, payload: NotePayload) -> Result<Note> {
        if !self.repo.exists(id).await? {
            return Err(Error::NoteNotFound(id));
        }

        let title = non_blank_field(payload.title, "Title")?;
        let content = non_blank_field(payload.content, "Content")?;
        let req = UpdateNoteRequest {
            title,
            content,
            tags: payload.tags.map(|t| t.trim().to_string()),
        };
        if req.is_empty() {
            debug!(
                subsystem = "api",
                component = "notes",
                op = "update",
                note_id = id,
                "No known fields; refreshing updated_at only"
            );
        }

        // The row can vanish between the lookup and the write.
        let note = self
            .repo
            .update_note(id, req)
            .await?
            .ok_or(Error::NoteNotFound(id))?;
        info!(subsystem = "api", component = "notes", op = "update", note_id = id, "Note updated");
        Ok(note)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.delete_note(id).await? {
            return Err(Error::NoteNotFound(id));
        }
        info!(subsystem = "api", component = "notes", op = "delete", note_id = id, "Note deleted");
        Ok(())
    }

    /// Sorted, de-duplicated tag tokens across every note.
    pub async fn all_tags(&self) -> Result<Vec<String>> {
        let notes = self.repo.get_all_notes().await?;
        Ok(collect_unique_tags(&notes))
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn non_blank_field(value: Option<String>, field: &str) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => {
            Err(Error::InvalidInput(format!("{} cannot be empty", field)))
        }
        Some(v) => Ok(Some(v.trim().to_string())),
    }
}
