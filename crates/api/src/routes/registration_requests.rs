//! Route definitions for membership registration requests.
//!
//! Mounted at `/registration-requests` by `api_routes()`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::registration_requests as requests;
use crate::state::AppState;

/// Registration request routes.
///
/// ```text
/// POST   /                  -> submit_registration_request (public)
/// GET    /                  -> list_registration_requests (admin only)
/// GET    /{id}              -> get_registration_request (admin only)
/// PUT    /{id}/status       -> update_registration_request_status (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(requests::submit_registration_request).get(requests::list_registration_requests),
        )
        .route("/{id}", get(requests::get_registration_request))
        .route(
            "/{id}/status",
            put(requests::update_registration_request_status),
        )
}
