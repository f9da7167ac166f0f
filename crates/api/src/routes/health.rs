//! `GET /health`, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the record store is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Newest applied migration; `None` if the store is unreachable.
    pub schema_version: Option<i64>,
    /// Trailing window in which repeated submissions are reused.
    pub dedup_window_secs: u64,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let schema_version = match alumni_db::schema_version(&state.pool).await {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            None
        }
    };
    let db_healthy = schema_version.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema_version: schema_version.flatten(),
        dedup_window_secs: state.config.dedup_window.as_duration().as_secs(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
