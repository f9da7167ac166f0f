//! Blog post validation.

use crate::error::CoreError;
use crate::submission::{validate_optional, validate_required, MAX_BODY_LENGTH, MAX_TITLE_LENGTH};

/// Maximum length of the optional teaser shown in listings.
pub const MAX_SUMMARY_LENGTH: usize = 500;

/// Validate the content fields of a blog submission.
pub fn validate_blog(title: &str, body: &str, summary: Option<&str>) -> Result<(), CoreError> {
    validate_required("title", title, MAX_TITLE_LENGTH)?;
    validate_required("body", body, MAX_BODY_LENGTH)?;
    validate_optional("summary", summary, MAX_SUMMARY_LENGTH)
}
