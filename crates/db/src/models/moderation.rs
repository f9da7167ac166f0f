//! Shared shape of moderated records and the DTOs used by the moderation
//! workflow (submit, transition, list).

use alumni_core::error::CoreError;
use alumni_core::moderation::{ModerationStatus, Transition};
use alumni_core::submission::{normalize_identity, validate_author_identity};
use alumni_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// A row in one of the moderated tables (`achievements`, `blogs`,
/// `registration_requests`).
///
/// The associated constants describe the table to the generic queries in
/// [`ModerationRepo`](crate::repositories::ModerationRepo). Every table
/// carries `author_identity`, `status`, `reviewed_by`, `created_at` and
/// `updated_at`.
pub trait ModeratedRecord:
    for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static
{
    /// Table name.
    const TABLE: &'static str;
    /// Entity name used in `NotFound` errors and logs.
    const ENTITY: &'static str;
    /// Column list selected and returned by every query.
    const COLUMNS: &'static str;
    /// Title-equivalent column that, together with `author_identity`,
    /// identifies a duplicate submission.
    const DEDUP_COLUMN: &'static str;
    /// Content columns matched by the free-text search, in addition to
    /// `author_identity`.
    const SEARCH_COLUMNS: &'static [&'static str];

    fn id(&self) -> DbId;
    fn author_identity(&self) -> &str;
    /// Raw status column value.
    fn status_str(&self) -> &str;

    /// Parsed moderation status.
    fn status(&self) -> Result<ModerationStatus, CoreError> {
        ModerationStatus::parse(self.status_str())
    }
}

/// Who submitted a record, as resolved by the caller.
#[derive(Debug, Clone)]
pub struct SubmissionAuthor {
    /// Account id when the submitter is logged in.
    pub user_id: Option<DbId>,
    /// Normalised display identity (display name or e-mail).
    pub identity: String,
}

impl SubmissionAuthor {
    /// Normalise `identity` (whitespace-collapsed) and reject blank or
    /// overlong values.
    pub fn new(user_id: Option<DbId>, identity: &str) -> Result<Self, CoreError> {
        let identity = normalize_identity(identity);
        validate_author_identity(&identity)?;
        Ok(Self { user_id, identity })
    }
}

/// Result of a duplicate-safe submission.
#[derive(Debug, Clone, Serialize)]
pub struct Submitted<T> {
    /// The inserted record, or the existing one when `reused` is set.
    pub record: T,
    /// `true` when an identical recent submission was returned instead of
    /// inserting a new row.
    pub reused: bool,
}

/// Result of a status transition request.
#[derive(Debug, Clone)]
pub struct StatusChange<T> {
    /// The record after the request (unchanged for a no-op).
    pub record: T,
    pub transition: Transition,
}

impl<T> StatusChange<T> {
    pub fn changed(&self) -> bool {
        matches!(self.transition, Transition::Changed { .. })
    }
}

/// Resolved list filter for moderated records.
#[derive(Debug, Clone)]
pub struct ModerationFilter {
    pub status: Option<ModerationStatus>,
    pub author_identity: Option<String>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Query parameters for listing moderated records.
#[derive(Debug, Deserialize)]
pub struct ModerationListParams {
    /// `pending`, `approved`, `denied` or `all`.
    pub status: Option<String>,
    /// Exact author identity (admins only; others are scoped to themselves).
    pub author: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// DTO for `PUT /{kind}/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateModerationStatus {
    pub status: String,
}

/// Number of records per status in one moderated table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
