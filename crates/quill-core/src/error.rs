//! Error types for quill.

use thiserror::Error;

/// Result type alias using quill's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for quill operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    /// Comment not found
    #[error("Comment not found: {0}")]
    CommentNotFound(i64),

    /// One or more required fields are missing or blank
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::migrate::MigrateError> for Error {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        Error::Migration(e.to_string())
    }
}
