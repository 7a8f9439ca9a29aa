//! Comment business rules.

use quill_core::{
    Comment, CommentRepository, CreateCommentRequest, Error, NoteRepository, Result,
};
use serde::Deserialize;
use tracing::info;

/// Comment fields as sent by a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPayload {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub note_id: Option<i64>,
}

/// Comment operations. Needs the note store to check that a referenced
/// note exists before attaching to it.
#[derive(Clone)]
pub struct CommentService<C, N> {
    comments: C,
    notes: N,
}

impl<C: CommentRepository, N: NoteRepository> CommentService<C, N> {
    pub fn new(comments: C, notes: N) -> Self {
        Self { comments, notes }
    }

    pub async fn create(&self, payload: CommentPayload) -> Result<Comment> {
        let mut errors = Vec::new();
        let content = payload
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if content.is_none() {
            errors.push("Content is required".to_string());
        }
        if payload.note_id.is_none() {
            errors.push("Note ID is required".to_string());
        }
        let (Some(content), Some(note_id)) = (content, payload.note_id) else {
            return Err(Error::Validation(errors));
        };

        if !self.notes.exists(note_id).await? {
            return Err(Error::NoteNotFound(note_id));
        }

        let comment = self
            .comments
            .create(CreateCommentRequest { note_id, content })
            .await?;
        info!(
            subsystem = "api",
            component = "comments",
            op = "create",
            comment_id = comment.id,
            note_id,
            "Comment created"
        );
        Ok(comment)
    }

    pub async fn get(&self, id: i64) -> Result<Comment> {
        self.comments.get(id).await?.ok_or(Error::CommentNotFound(id))
    }

    pub async fn list(&self, note_id: Option<i64>) -> Result<Vec<Comment>> {
        self.comments.list(note_id).await
    }

    pub async fn update(&self, id: i64, payload: CommentPayload) -> Result<Comment> {
        if self.comments.get(id).await?.is_none() {
            return Err(Error::CommentNotFound(id));
        }
        let content = payload
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::Validation(vec!["Content is required".to_string()]))?;

        let comment = self
            .comments
            .update(id, &content)
            .await?
            .ok_or(Error::CommentNotFound(id))?;
        info!(subsystem = "api", component = "comments", op = "update", comment_id = id, "Comment updated");
        Ok(comment)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.comments.delete(id).await? {
            return Err(Error::CommentNotFound(id));
        }
        info!(subsystem = "api", component = "comments", op = "delete", comment_id = id, "Comment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_db::test_fixtures::{TestDataBuilder, TestDatabase};
    use quill_db::{SqliteCommentRepository, SqliteNoteRepository};

    type Service = CommentService<SqliteCommentRepository, SqliteNoteRepository>;

    fn service(test_db: &TestDatabase) -> Service {
        CommentService::new(test_db.db.comments.clone(), test_db.db.notes.clone())
    }

    fn payload(content: Option<&str>, note_id: Option<i64>) -> CommentPayload {
        CommentPayload {
            content: content.map(String::from),
            note_id,
        }
    }

    #[tokio::test]
    async fn test_create_requires_content_and_note_id() {
        let test_db = TestDatabase::new().await;
        let err = service(&test_db).create(payload(Some("  "), None)).await.unwrap_err();
        match err {
            Error::Validation(errors) => {
                assert_eq!(errors, vec!["Content is required", "Note ID is required"])
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_for_unknown_note() {
        let test_db = TestDatabase::new().await;
        let err = service(&test_db)
            .create(payload(Some("Hello"), Some(404)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoteNotFound(404)));
    }

    #[tokio::test]
    async fn test_create_trims_content() {
        let test_db = TestDatabase::new().await;
        let data = TestDataBuilder::new(&test_db.db)
            .with_note("Host", "body")
            .await
            .build()
            .await;
        let comment = service(&test_db)
            .create(payload(Some("  Nice note  "), Some(data.notes[0].id)))
            .await
            .unwrap();
        assert_eq!(comment.content, "Nice note");
        assert_eq!(comment.note_id, data.notes[0].id);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_comment() {
        let test_db = TestDatabase::new().await;
        let service = service(&test_db);
        assert!(matches!(
            service.update(9, payload(Some("x"), None)).await,
            Err(Error::CommentNotFound(9))
        ));
        assert!(matches!(service.delete(9).await, Err(Error::CommentNotFound(9))));
    }

    #[tokio::test]
    async fn test_update_requires_content() {
        let test_db = TestDatabase::new().await;
        let data = TestDataBuilder::new(&test_db.db)
            .with_note("Host", "body")
            .await
            .with_comment("original")
            .await
            .build()
            .await;
        let err = service(&test_db)
            .update(data.comments[0].id, payload(None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
