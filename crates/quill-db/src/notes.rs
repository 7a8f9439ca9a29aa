//! Note repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, info};

use quill_core::{CreateNoteRequest, Note, NoteRepository, Result, UpdateNoteRequest};

use crate::{escape_like, timestamp};

const NOTE_COLUMNS: &str = "id, title, content, tags, created_at, updated_at";

/// SQLite implementation of NoteRepository.
#[derive(Clone)]
pub struct SqliteNoteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteNoteRepository {
    /// Create a new SqliteNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Run a `SELECT` over notes with one LIKE pattern bound to every `?`.
    async fn fetch_matching(
        &self,
        where_clause: &str,
        binds: usize,
        pattern: &str,
    ) -> Result<Vec<Note>> {
        let sql = format!(
            "SELECT {} FROM notes WHERE {} ORDER BY created_at DESC, id ASC",
            NOTE_COLUMNS, where_clause
        );
        let mut query = sqlx::query(&sql);
        for _ in 0..binds {
            query = query.bind(pattern);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(map_row_to_note).collect()
    }
}

/// Map a database row to a Note.
fn map_row_to_note(row: &SqliteRow) -> Result<Note> {
    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        tags: row.try_get("tags")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

/// Build a `%term%` LIKE pattern with wildcards in `term` escaped.
fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn create_note(&self, req: CreateNoteRequest) -> Result<Note> {
        let now = timestamp(Utc::now());
        let sql = format!(
            "INSERT INTO notes (title, content, tags, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {}",
            NOTE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&req.title)
            .bind(&req.content)
            .bind(&req.tags)
            .bind(&now)
            .bind(&now)
            .fetch_one(&self.pool)
            .await?;
        let note = map_row_to_note(&row)?;

        info!(
            subsystem = "db",
            component = "notes",
            op = "create",
            note_id = note.id,
            "Note created"
        );
        Ok(note)
    }

    async fn get_note_by_id(&self, id: i64) -> Result<Option<Note>> {
        let sql = format!("SELECT {} FROM notes WHERE id = ?", NOTE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_row_to_note).transpose()
    }

    async fn get_all_notes(&self) -> Result<Vec<Note>> {
        let sql = format!(
            "SELECT {} FROM notes ORDER BY created_at DESC, id ASC",
            NOTE_COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let notes = rows
            .iter()
            .map(map_row_to_note)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "list",
            result_count = notes.len(),
            "Listed notes"
        );
        Ok(notes)
    }

    async fn update_note(&self, id: i64, req: UpdateNoteRequest) -> Result<Option<Note>> {
        // MAX keeps updated_at monotonic even if the wall clock steps back.
        let sql = format!(
            "UPDATE notes
             SET title = COALESCE(?, title),
                 content = COALESCE(?, content),
                 tags = COALESCE(?, tags),
                 updated_at = MAX(updated_at, ?)
             WHERE id = ?
             RETURNING {}",
            NOTE_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&req.title)
            .bind(&req.content)
            .bind(&req.tags)
            .bind(timestamp(Utc::now()))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let note = row.as_ref().map(map_row_to_note).transpose()?;
        if note.is_some() {
            info!(
                subsystem = "db",
                component = "notes",
                op = "update",
                note_id = id,
                "Note updated"
            );
        }
        Ok(note)
    }

    async fn delete_note(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        let deleted = result.rows_affected() > 0;

        info!(
            subsystem = "db",
            component = "notes",
            op = "delete",
            note_id = id,
            success = deleted,
            "Note delete executed"
        );
        Ok(deleted)
    }

    async fn search_notes(&self, term: &str) -> Result<Vec<Note>> {
        let notes = self
            .fetch_matching(
                r"LOWER(title) LIKE LOWER(?) ESCAPE '\' OR LOWER(content) LIKE LOWER(?) ESCAPE '\'",
                2,
                &contains_pattern(term),
            )
            .await?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "search",
            query = term,
            result_count = notes.len(),
            "Searched notes"
        );
        Ok(notes)
    }

    async fn get_notes_by_tag(&self, tag: &str) -> Result<Vec<Note>> {
        let notes = self
            .fetch_matching(
                r"LOWER(tags) LIKE LOWER(?) ESCAPE '\'",
                1,
                &contains_pattern(tag),
            )
            .await?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "by_tag",
            query = tag,
            result_count = notes.len(),
            "Filtered notes by tag"
        );
        Ok(notes)
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM notes WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_wraps_term() {
        assert_eq!(contains_pattern("rust"), "%rust%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("100%_done"), r"%100\%\_done%");
    }
}
