pub mod achievements;
pub mod admin;
pub mod auth;
pub mod blogs;
pub mod forum;
pub mod health;
pub mod inquiries;
pub mod registration_requests;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/me                             current user (requires auth)
///
/// /admin/users                         list, create (admin only)
/// /admin/users/{id}                    get, update (admin only)
/// /admin/moderation/summary            per-status counts (admin only)
///
/// /achievements                        submit, list
/// /achievements/published              approved only (public)
/// /achievements/{id}                   get
/// /achievements/{id}/status            transition (admin only)
///
/// /blogs                               submit, list
/// /blogs/published                     approved only (public)
/// /blogs/{id}                          get
/// /blogs/{id}/status                   transition (admin only)
///
/// /registration-requests               submit (public), list (admin only)
/// /registration-requests/{id}          get (admin only)
/// /registration-requests/{id}/status   transition (admin only)
///
/// /queries                             create (public), list (admin only)
/// /queries/{id}/resolve                resolve (admin only)
///
/// /forum/threads                       list, create
/// /forum/threads/{id}                  get with replies, delete
/// /forum/threads/{id}/replies          reply
/// /forum/replies/{id}                  delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/achievements", achievements::router())
        .nest("/blogs", blogs::router())
        .nest("/registration-requests", registration_requests::router())
        .nest("/queries", inquiries::router())
        .nest("/forum", forum::router())
}
