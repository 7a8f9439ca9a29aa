//! Structured logging schema and field name constants for quill.
//!
//! Every field name emitted by the `tracing` calls across the workspace is
//! listed here, so log aggregation can query by the same names everywhere.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, client error worth noticing |
//! | INFO  | Lifecycle events (startup, shutdown), mutations |
//! | DEBUG | Decision points, query shapes, result counts |
//! | TRACE | Per-item iteration (tag tokens, rows) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the `x-request-id` header.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "db"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "notes", "comments", "pool", "migrations"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create", "search", "by_tag", "delete"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Note id being operated on.
pub const NOTE_ID: &str = "note_id";

/// Comment id being operated on.
pub const COMMENT_ID: &str = "comment_id";

/// Search term or tag filter text.
pub const QUERY: &str = "query";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows returned by a query.
pub const RESULT_COUNT: &str = "result_count";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
