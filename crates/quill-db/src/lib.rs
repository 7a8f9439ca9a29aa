//! # quill-db
//!
//! SQLite database layer for quill.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for notes and comments
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use quill_db::{CreateNoteRequest, Database, NoteRepository, PoolConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect_with_config("sqlite://quill.db", PoolConfig::new()).await?;
//!     db.migrate().await?;
//!
//!     let note = db.notes.create_note(CreateNoteRequest {
//!         title: "Hello".to_string(),
//!         content: "world".to_string(),
//!         tags: Some("greeting".to_string()),
//!     }).await?;
//!
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```
pub mod comments;
pub mod notes;
pub mod pool;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) and dependent crates can use them
pub mod test_fixtures;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use tracing::info;

// Re-export core types
pub use quill_core::*;

pub use comments::SqliteCommentRepository;
pub use notes::SqliteNoteRepository;
pub use pool::{create_pool_with_config, log_pool_metrics, PoolConfig};

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Render a timestamp in the fixed-width form stored in `*_at` columns.
///
/// Fixed width keeps lexical order equal to chronological order, which the
/// `ORDER BY created_at` queries and `MAX(updated_at, ?)` rely on.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: SqlitePool,
    /// Note repository for CRUD, search and tag filtering.
    pub notes: SqliteNoteRepository,
    /// Comment repository.
    pub comments: SqliteCommentRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            notes: SqliteNoteRepository::new(pool.clone()),
            comments: SqliteCommentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to the given URL with the given pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Open a private in-memory database with the schema applied.
    pub async fn in_memory() -> Result<Self> {
        let db = Self::connect_with_config("sqlite::memory:", PoolConfig::in_memory()).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Run pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        info!(
            subsystem = "db",
            component = "migrations",
            op = "run",
            "Database migrations applied"
        );
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
