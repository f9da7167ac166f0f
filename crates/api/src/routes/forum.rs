//! Route definitions for the discussion forum.
//!
//! Mounted at `/forum` by `api_routes()`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::forum;
use crate::state::AppState;

/// Forum routes.
///
/// ```text
/// GET    /threads                  -> list_threads
/// POST   /threads                  -> create_thread
/// GET    /threads/{id}             -> get_thread
/// DELETE /threads/{id}             -> delete_thread (author or admin)
/// POST   /threads/{id}/replies     -> create_reply
/// DELETE /replies/{id}             -> delete_reply (author or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/threads",
            get(forum::list_threads).post(forum::create_thread),
        )
        .route(
            "/threads/{id}",
            get(forum::get_thread).delete(forum::delete_thread),
        )
        .route("/threads/{id}/replies", post(forum::create_reply))
        .route("/replies/{id}", delete(forum::delete_reply))
}
