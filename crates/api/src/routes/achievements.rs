//! Route definitions for achievements.
//!
//! Mounted at `/achievements` by `api_routes()`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::achievements;
use crate::state::AppState;

/// Achievement routes.
///
/// ```text
/// POST   /                  -> submit_achievement
/// GET    /                  -> list_achievements
/// GET    /published         -> list_published_achievements (public)
/// GET    /{id}              -> get_achievement
/// PUT    /{id}/status       -> update_achievement_status (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(achievements::submit_achievement).get(achievements::list_achievements),
        )
        .route(
            "/published",
            get(achievements::list_published_achievements),
        )
        .route("/{id}", get(achievements::get_achievement))
        .route(
            "/{id}/status",
            put(achievements::update_achievement_status),
        )
}
