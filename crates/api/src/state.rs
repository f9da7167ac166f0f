use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifications::StatusNotifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, created once at startup.
    pub pool: alumni_db::DbPool,
    /// Server configuration (JWT settings, dedup window, timeouts).
    pub config: Arc<ServerConfig>,
    /// Receives "status changed" events after effective moderation transitions.
    pub notifier: Arc<dyn StatusNotifier>,
}
