//! Discussion forum validation and ownership rules.

use crate::error::CoreError;
use crate::roles::is_admin;
use crate::submission::{validate_required, MAX_TITLE_LENGTH};
use crate::types::DbId;

/// Maximum length of a thread opener or reply body.
pub const MAX_POST_LENGTH: usize = 10_000;

/// Validate a new thread.
pub fn validate_thread(title: &str, body: &str) -> Result<(), CoreError> {
    validate_required("title", title, MAX_TITLE_LENGTH)?;
    validate_required("body", body, MAX_POST_LENGTH)
}

/// Validate a reply body.
pub fn validate_reply(body: &str) -> Result<(), CoreError> {
    validate_required("body", body, MAX_POST_LENGTH)
}

/// Only the author of a post or an administrator may delete it.
pub fn ensure_can_delete(
    author_id: DbId,
    actor_id: DbId,
    actor_role: &str,
) -> Result<(), CoreError> {
    if author_id == actor_id || is_admin(actor_role) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the author or an admin can delete this post".into(),
        ))
    }
}
