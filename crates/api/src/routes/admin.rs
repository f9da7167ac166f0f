//! Route definitions for administration.
//!
//! Mounted at `/admin` by `api_routes()`. Every route requires the admin role.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes.
///
/// ```text
/// GET    /users                  -> list_users
/// POST   /users                  -> create_user
/// GET    /users/{id}             -> get_user
/// PUT    /users/{id}             -> update_user
/// GET    /moderation/summary     -> moderation_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/users/{id}", get(admin::get_user).put(admin::update_user))
        .route("/moderation/summary", get(admin::moderation_summary))
}
