//! Submission intake rules shared by every moderated record kind.
//!
//! Covers the author-identity normalisation applied at the boundary, the
//! required/optional text field checks, and the duplicate-suppression
//! window used by the repository layer.

use std::time::Duration;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of an author identity (display name or e-mail).
pub const MAX_AUTHOR_IDENTITY_LENGTH: usize = 120;

/// Maximum length of a title-like field (blog title, achievement title).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a body-like field (blog body, achievement description).
pub const MAX_BODY_LENGTH: usize = 20_000;

/// Maximum length of short labels (category, branch, summary).
pub const MAX_LABEL_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Dedup window
// ---------------------------------------------------------------------------

/// Default trailing window inside which a repeated submission is a duplicate.
pub const DEFAULT_DEDUP_WINDOW_SECS: u64 = 300;

/// Largest accepted dedup window (one day).
pub const MAX_DEDUP_WINDOW_SECS: u64 = 86_400;

/// Trailing interval within which a repeat of the same
/// (author, title-equivalent) pair returns the existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupWindow(Duration);

impl DedupWindow {
    /// Build a window, rejecting zero and anything above one day.
    pub fn from_secs(secs: u64) -> Result<Self, CoreError> {
        if secs == 0 || secs > MAX_DEDUP_WINDOW_SECS {
            return Err(CoreError::Validation(format!(
                "Dedup window must be between 1 and {MAX_DEDUP_WINDOW_SECS} seconds (got {secs})"
            )));
        }
        Ok(Self(Duration::from_secs(secs)))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Window length in seconds, as bound into `make_interval(secs => ...)`.
    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl Default for DedupWindow {
    fn default() -> Self {
        Self(Duration::from_secs(DEFAULT_DEDUP_WINDOW_SECS))
    }
}

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Trim and collapse internal whitespace runs to a single space.
///
/// Applied to author identities and dedup keys so that `"Jane  Doe "` and
/// `"Jane Doe"` name the same submitter.
pub fn normalize_identity(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim an optional text field, mapping blank values to `None`.
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a required text field: non-blank and at most `max_chars` characters.
pub fn validate_required(field: &str, value: &str, max_chars: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    validate_max_length(field, value, max_chars)
}

/// Validate an optional text field's length when present.
pub fn validate_optional(
    field: &str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_max_length(field, v, max_chars),
        None => Ok(()),
    }
}

/// Validate the author identity attached to a submission.
pub fn validate_author_identity(identity: &str) -> Result<(), CoreError> {
    validate_required("author_identity", identity, MAX_AUTHOR_IDENTITY_LENGTH)
}

fn validate_max_length(field: &str, value: &str, max_chars: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max_chars {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max_chars} characters (got {len})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_and_blank_required_fields_are_rejected() {
        assert_matches!(
            validate_required("title", "", MAX_TITLE_LENGTH),
            Err(CoreError::Validation(msg)) if msg.contains("title")
        );
        assert!(validate_required("title", "   \n", MAX_TITLE_LENGTH).is_err());
    }

    #[test]
    fn title_at_maximum_length_is_accepted() {
        let title = "t".repeat(MAX_TITLE_LENGTH);
        assert!(validate_required("title", &title, MAX_TITLE_LENGTH).is_ok());
    }

    #[test]
    fn title_over_maximum_length_is_rejected() {
        let title = "t".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_required("title", &title, MAX_TITLE_LENGTH).is_err());
    }

    #[test]
    fn length_is_counted_in_characters() {
        // 200 multi-byte characters is still within the limit.
        let title = "é".repeat(MAX_TITLE_LENGTH);
        assert!(validate_required("title", &title, MAX_TITLE_LENGTH).is_ok());
    }

    #[test]
    fn optional_field_only_checks_length() {
        assert!(validate_optional("summary", None, 10).is_ok());
        assert!(validate_optional("summary", Some("short"), 10).is_ok());
        assert!(validate_optional("summary", Some("much too long"), 10).is_err());
    }

    #[test]
    fn identity_normalisation_collapses_whitespace() {
        assert_eq!(normalize_identity("  Jane   Doe "), "Jane Doe");
        assert_eq!(normalize_identity("Jane\tDoe"), "Jane Doe");
        assert_eq!(normalize_identity("   "), "");
    }

    #[test]
    fn blank_optional_becomes_none() {
        assert_eq!(normalize_optional(Some("  ")), None);
        assert_eq!(normalize_optional(Some(" x ")), Some("x".to_string()));
        assert_eq!(normalize_optional(None), None);
    }

    #[test]
    fn dedup_window_bounds() {
        assert!(DedupWindow::from_secs(0).is_err());
        assert!(DedupWindow::from_secs(MAX_DEDUP_WINDOW_SECS + 1).is_err());
        assert_eq!(
            DedupWindow::from_secs(60).unwrap().as_duration(),
            Duration::from_secs(60)
        );
        assert_eq!(
            DedupWindow::default().as_secs_f64(),
            DEFAULT_DEDUP_WINDOW_SECS as f64
        );
    }
}
