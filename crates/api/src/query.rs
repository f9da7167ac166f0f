//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Free-text search with pagination (`?search=&limit=&offset=`).
///
/// Used by public listings that take no other filter. Values are clamped in
/// the handlers via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
