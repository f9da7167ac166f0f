//! Contact query ("Contact us" form) validation.

use crate::error::CoreError;
use crate::registration::{validate_email, MAX_NAME_LENGTH};
use crate::submission::{validate_required, MAX_TITLE_LENGTH};

/// Maximum length of a query message.
pub const MAX_MESSAGE_LENGTH: usize = 5_000;

/// Validate a contact query. `email` is expected to be normalised.
pub fn validate_inquiry(
    name: &str,
    email: &str,
    subject: &str,
    message: &str,
) -> Result<(), CoreError> {
    validate_required("name", name, MAX_NAME_LENGTH)?;
    validate_email(email)?;
    validate_required("subject", subject, MAX_TITLE_LENGTH)?;
    validate_required("message", message, MAX_MESSAGE_LENGTH)
}
