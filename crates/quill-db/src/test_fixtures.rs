//! Test fixtures for database integration tests.
//!
//! Provides an isolated in-memory database per test plus a small data
//! builder, so tests never share state and need no external server.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quill_db::test_fixtures::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let test_db = TestDatabase::new().await;
//!     let data = TestDataBuilder::new(&test_db.db)
//!         .with_note("Rust", "Ownership and borrowing")
//!         .await
//!         .with_tagged_note("Groceries", "Milk", "personal,errands")
//!         .await
//!         .build()
//!         .await;
//!
//!     // Run your tests...
//! }
//! ```

use std::time::Duration;

use crate::{CreateCommentRequest, CreateNoteRequest, Database, Note, NoteRepository};
use crate::{Comment, CommentRepository};

/// Pause between seeded notes so `created_at` ordering is unambiguous.
pub const SEED_SPACING: Duration = Duration::from_millis(5);

/// A freshly migrated in-memory database owned by one test.
pub struct TestDatabase {
    pub db: Database,
}

impl TestDatabase {
    /// Create a new, empty, migrated database.
    ///
    /// Panics if SQLite cannot be opened; fixtures are test-only.
    pub async fn new() -> Self {
        let db = Database::in_memory()
            .await
            .expect("Failed to open in-memory test database");
        Self { db }
    }
}

/// Builder for seeding notes and comments in creation order.
pub struct TestDataBuilder<'a> {
    db: &'a Database,
    notes: Vec<Note>,
    comments: Vec<Comment>,
}

impl<'a> TestDataBuilder<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            notes: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Seed an untagged note.
    pub async fn with_note(self, title: &str, content: &str) -> Self {
        self.insert_note(title, content, None).await
    }

    /// Seed a note with a raw comma-separated tag string.
    pub async fn with_tagged_note(self, title: &str, content: &str, tags: &str) -> Self {
        self.insert_note(title, content, Some(tags)).await
    }

    /// Seed a comment on the most recently seeded note.
    pub async fn with_comment(mut self, content: &str) -> Self {
        let note_id = self
            .notes
            .last()
            .map(|n| n.id)
            .expect("with_comment requires a seeded note");
        let comment = self
            .db
            .comments
            .create(CreateCommentRequest {
                note_id,
                content: content.to_string(),
            })
            .await
            .expect("Failed to seed comment");
        self.comments.push(comment);
        self
    }

    async fn insert_note(mut self, title: &str, content: &str, tags: Option<&str>) -> Self {
        if !self.notes.is_empty() {
            tokio::time::sleep(SEED_SPACING).await;
        }
        let note = self
            .db
            .notes
            .create_note(CreateNoteRequest {
                title: title.to_string(),
                content: content.to_string(),
                tags: tags.map(String::from),
            })
            .await
            .expect("Failed to seed note");
        self.notes.push(note);
        self
    }

    pub async fn build(self) -> TestData {
        TestData {
            notes: self.notes,
            comments: self.comments,
        }
    }
}

/// Seeded rows, in creation order.
#[derive(Debug, Clone)]
pub struct TestData {
    pub notes: Vec<Note>,
    pub comments: Vec<Comment>,
}

/// Seed the three tagged notes used by the tag filter and tag listing tests.
pub async fn seed_tagged_notes(db: &Database) -> TestData {
    TestDataBuilder::new(db)
        .with_tagged_note("Note 1", "Content 1", "work,important")
        .await
        .with_tagged_note("Note 2", "Content 2", "personal,important")
        .await
        .with_tagged_note("Note 3", "Content 3", "work,urgent")
        .await
        .build()
        .await
}
