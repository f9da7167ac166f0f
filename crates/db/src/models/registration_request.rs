//! Membership registration request model and DTOs.

use alumni_core::error::CoreError;
use alumni_core::registration::{
    normalize_email, normalize_registration_number, validate_registration,
};
use alumni_core::submission::{normalize_identity, normalize_optional};
use alumni_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::moderation::{ModeratedRecord, SubmissionAuthor};

/// A row from the `registration_requests` table.
///
/// `author_identity` holds the applicant's normalised e-mail.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationRequest {
    pub id: DbId,
    pub author_identity: String,
    pub full_name: String,
    pub branch: String,
    pub registration_number: String,
    pub graduation_year: Option<i32>,
    pub linkedin_url: Option<String>,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ModeratedRecord for RegistrationRequest {
    const TABLE: &'static str = "registration_requests";
    const ENTITY: &'static str = "RegistrationRequest";
    const COLUMNS: &'static str = "\
        id, author_identity, full_name, branch, registration_number, \
        graduation_year, linkedin_url, status, reviewed_by, created_at, updated_at";
    const DEDUP_COLUMN: &'static str = "registration_number";
    const SEARCH_COLUMNS: &'static [&'static str] =
        &["full_name", "branch", "registration_number"];

    fn id(&self) -> DbId {
        self.id
    }

    fn author_identity(&self) -> &str {
        &self.author_identity
    }

    fn status_str(&self) -> &str {
        &self.status
    }
}

/// Request body for submitting a registration request (public).
#[derive(Debug, Deserialize)]
pub struct CreateRegistrationRequest {
    pub full_name: String,
    pub branch: String,
    pub registration_number: String,
    pub email: String,
    pub graduation_year: Option<i32>,
    pub linkedin_url: Option<String>,
}

/// A validated, normalised registration request ready for insert.
#[derive(Debug, Clone)]
pub struct NewRegistrationRequest {
    pub author: SubmissionAuthor,
    pub full_name: String,
    pub branch: String,
    pub registration_number: String,
    pub graduation_year: Option<i32>,
    pub linkedin_url: Option<String>,
}

impl NewRegistrationRequest {
    /// Normalise and validate an application. The e-mail becomes the
    /// author identity; `current_year` bounds the graduation year.
    pub fn new(input: &CreateRegistrationRequest, current_year: i32) -> Result<Self, CoreError> {
        let email = normalize_email(&input.email);
        let request = Self {
            author: SubmissionAuthor {
                user_id: None,
                identity: email,
            },
            full_name: normalize_identity(&input.full_name),
            branch: input.branch.trim().to_string(),
            registration_number: normalize_registration_number(&input.registration_number),
            graduation_year: input.graduation_year,
            linkedin_url: normalize_optional(input.linkedin_url.as_deref()),
        };
        validate_registration(
            &request.full_name,
            &request.branch,
            &request.registration_number,
            &request.author.identity,
            request.graduation_year,
            request.linkedin_url.as_deref(),
            current_year,
        )?;
        Ok(request)
    }
}
