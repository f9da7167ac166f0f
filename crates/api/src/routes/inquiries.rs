//! Route definitions for contact queries.
//!
//! Mounted at `/queries` by `api_routes()`.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::inquiries;
use crate::state::AppState;

/// Contact query routes.
///
/// ```text
/// POST   /                  -> create_inquiry (public)
/// GET    /                  -> list_inquiries (admin only)
/// PUT    /{id}/resolve      -> resolve_inquiry (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(inquiries::create_inquiry).get(inquiries::list_inquiries),
        )
        .route("/{id}/resolve", put(inquiries::resolve_inquiry))
}
