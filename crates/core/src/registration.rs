//! Membership registration request validation.
//!
//! Prospective members submit their details without an account. The
//! submitter's e-mail is the author identity and the college registration
//! number is the dedup key, so a double-clicked form yields one request.

use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;
use crate::submission::{validate_optional, validate_required, MAX_LABEL_LENGTH};

/// Maximum length of a full name.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum length of an e-mail address (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of a LinkedIn profile URL.
pub const MAX_URL_LENGTH: usize = 300;

/// Earliest accepted graduation year.
pub const MIN_GRADUATION_YEAR: i32 = 1950;

/// Graduation years may lie this many years ahead (current students).
pub const MAX_YEARS_AHEAD: i32 = 6;

/// College registration numbers: alphanumerics, `/` and `-`, 3 to 32 chars.
pub const REGISTRATION_NUMBER_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9/\-]{2,31}$";

/// LinkedIn profile URLs on any regional subdomain.
pub const LINKEDIN_URL_PATTERN: &str = r"^https://([a-z]{2,3}\.)?linkedin\.com/";

static REGISTRATION_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(REGISTRATION_NUMBER_PATTERN).expect("valid regex"));

static LINKEDIN_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LINKEDIN_URL_PATTERN).expect("valid regex"));

/// Canonical form of an e-mail used as author identity.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Canonical form of a registration number (upper-cased, trimmed).
pub fn normalize_registration_number(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Validate an e-mail address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    validate_required("email", email, MAX_EMAIL_LENGTH)?;
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "email '{email}' is not a valid address"
        )));
    }
    Ok(())
}

/// Validate a registration number against [`REGISTRATION_NUMBER_PATTERN`].
pub fn validate_registration_number(number: &str) -> Result<(), CoreError> {
    if !REGISTRATION_NUMBER_RE.is_match(number) {
        return Err(CoreError::Validation(format!(
            "registration_number '{number}' must be 3-32 letters, digits, '/' or '-'"
        )));
    }
    Ok(())
}

/// Validate an optional LinkedIn profile URL.
pub fn validate_linkedin_url(url: Option<&str>) -> Result<(), CoreError> {
    let Some(url) = url else {
        return Ok(());
    };
    validate_optional("linkedin_url", Some(url), MAX_URL_LENGTH)?;
    if !url.validate_url() || !LINKEDIN_URL_RE.is_match(url) {
        return Err(CoreError::Validation(
            "linkedin_url must be an https://linkedin.com/ profile URL".to_string(),
        ));
    }
    Ok(())
}

/// Validate an optional graduation year relative to `current_year`.
pub fn validate_graduation_year(year: Option<i32>, current_year: i32) -> Result<(), CoreError> {
    let Some(year) = year else {
        return Ok(());
    };
    let max = current_year + MAX_YEARS_AHEAD;
    if !(MIN_GRADUATION_YEAR..=max).contains(&year) {
        return Err(CoreError::Validation(format!(
            "graduation_year must be between {MIN_GRADUATION_YEAR} and {max} (got {year})"
        )));
    }
    Ok(())
}

/// Validate every field of a registration request.
///
/// Expects already-normalised values (see [`normalize_email`] and
/// [`normalize_registration_number`]).
pub fn validate_registration(
    full_name: &str,
    branch: &str,
    registration_number: &str,
    email: &str,
    graduation_year: Option<i32>,
    linkedin_url: Option<&str>,
    current_year: i32,
) -> Result<(), CoreError> {
    validate_required("full_name", full_name, MAX_NAME_LENGTH)?;
    validate_required("branch", branch, MAX_LABEL_LENGTH)?;
    validate_required("registration_number", registration_number, 32)?;
    validate_registration_number(registration_number)?;
    validate_email(email)?;
    validate_graduation_year(graduation_year, current_year)?;
    validate_linkedin_url(linkedin_url)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
