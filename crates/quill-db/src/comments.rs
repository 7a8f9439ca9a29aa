//! Comment repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, info};

use quill_core::{Comment, CommentRepository, CreateCommentRequest, Result};

use crate::timestamp;

const COMMENT_COLUMNS: &str = "id, note_id, content, created_at";

/// SQLite implementation of CommentRepository.
#[derive(Clone)]
pub struct SqliteCommentRepository {
    pool: Pool<Sqlite>,
}

impl SqliteCommentRepository {
    /// Create a new SqliteCommentRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

fn map_row_to_comment(row: &SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: row.try_get("id")?,
        note_id: row.try_get("note_id")?,
        content: row.try_get("content")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl CommentRepository for SqliteCommentRepository {
    async fn create(&self, req: CreateCommentRequest) -> Result<Comment> {
        let sql = format!(
            "INSERT INTO comments (note_id, content, created_at)
             VALUES (?, ?, ?)
             RETURNING {}",
            COMMENT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(req.note_id)
            .bind(&req.content)
            .bind(timestamp(Utc::now()))
            .fetch_one(&self.pool)
            .await?;
        let comment = map_row_to_comment(&row)?;

        info!(
            subsystem = "db",
            component = "comments",
            op = "create",
            comment_id = comment.id,
            note_id = comment.note_id,
            "Comment created"
        );
        Ok(comment)
    }

    async fn get(&self, id: i64) -> Result<Option<Comment>> {
        let sql = format!("SELECT {} FROM comments WHERE id = ?", COMMENT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_row_to_comment).transpose()
    }

    async fn list(&self, note_id: Option<i64>) -> Result<Vec<Comment>> {
        let rows = match note_id {
            Some(note_id) => {
                let sql = format!(
                    "SELECT {} FROM comments WHERE note_id = ? ORDER BY created_at ASC, id ASC",
                    COMMENT_COLUMNS
                );
                sqlx::query(&sql)
                    .bind(note_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM comments ORDER BY created_at ASC, id ASC",
                    COMMENT_COLUMNS
                );
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
        };
        let comments = rows
            .iter()
            .map(map_row_to_comment)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            subsystem = "db",
            component = "comments",
            op = "list",
            note_id = ?note_id,
            result_count = comments.len(),
            "Listed comments"
        );
        Ok(comments)
    }

    async fn update(&self, id: i64, content: &str) -> Result<Option<Comment>> {
        let sql = format!(
            "UPDATE comments SET content = ? WHERE id = ? RETURNING {}",
            COMMENT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(content)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_row_to_comment).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        let deleted = result.rows_affected() > 0;

        info!(
            subsystem = "db",
            component = "comments",
            op = "delete",
            comment_id = id,
            success = deleted,
            "Comment delete executed"
        );
        Ok(deleted)
    }
}
