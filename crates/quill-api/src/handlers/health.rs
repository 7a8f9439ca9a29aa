use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::AppState;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `GET /health`
///
/// 200 when the database answers a trivial query, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    quill_db::log_pool_metrics(state.db.pool());

    match sqlx::query("SELECT 1").execute(state.db.pool()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "version": VERSION })),
        ),
        Err(e) => {
            warn!(subsystem = "api", component = "health", error = %e, "Database unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "version": VERSION })),
            )
        }
    }
}
