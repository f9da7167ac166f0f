//! Route definitions for blog posts.
//!
//! Mounted at `/blogs` by `api_routes()`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::blogs;
use crate::state::AppState;

/// Blog routes.
///
/// ```text
/// POST   /                  -> submit_blog
/// GET    /                  -> list_blogs
/// GET    /published         -> list_published_blogs (public)
/// GET    /{id}              -> get_blog
/// PUT    /{id}/status       -> update_blog_status (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(blogs::submit_blog).get(blogs::list_blogs))
        .route("/published", get(blogs::list_published_blogs))
        .route("/{id}", get(blogs::get_blog))
        .route("/{id}/status", put(blogs::update_blog_status))
}
