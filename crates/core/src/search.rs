//! Shared list/search helpers: pagination clamping and `ILIKE` pattern
//! construction for the free-text filters.

use crate::error::CoreError;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Hard upper bound on page size.
pub const MAX_PAGE_LIMIT: i64 = 200;

/// Maximum length of a free-text search term.
pub const MAX_SEARCH_LENGTH: usize = 200;

/// Clamp a user-provided limit into `1..=max`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Normalise a `?search=` term: trimmed, blank means no search.
pub fn normalize_search(raw: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(term) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if term.chars().count() > MAX_SEARCH_LENGTH {
        return Err(CoreError::Validation(format!(
            "search exceeds maximum length of {MAX_SEARCH_LENGTH} characters"
        )));
    }
    Ok(Some(term.to_string()))
}

/// Build a substring `ILIKE` pattern, escaping the LIKE metacharacters so
/// user input always matches literally.
///
/// PostgreSQL's default `LIKE` escape character is the backslash.
pub fn ilike_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
