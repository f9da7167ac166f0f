//! Blog post entity model and DTOs.

use alumni_core::blog::validate_blog;
use alumni_core::error::CoreError;
use alumni_core::submission::normalize_optional;
use alumni_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::moderation::{ModeratedRecord, SubmissionAuthor};

/// A row from the `blogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Blog {
    pub id: DbId,
    pub author_id: Option<DbId>,
    pub author_identity: String,
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ModeratedRecord for Blog {
    const TABLE: &'static str = "blogs";
    const ENTITY: &'static str = "Blog";
    const COLUMNS: &'static str = "\
        id, author_id, author_identity, title, summary, body, \
        status, reviewed_by, created_at, updated_at";
    const DEDUP_COLUMN: &'static str = "title";
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "summary", "body"];

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

/// Request body for submitting a blog post.
#[derive(Debug, Deserialize)]
pub struct CreateBlog {
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
}

/// A validated, normalised blog submission ready for insert.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub author: SubmissionAuthor,
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
}

impl NewBlog {
    /// Normalise and validate a submission from `author`.
    pub fn new(author: SubmissionAuthor, input: &CreateBlog) -> Result<Self, CoreError> {
        let blog = Self {
            author,
            title: input.title.trim().to_string(),
            summary: normalize_optional(input.summary.as_deref()),
            body: input.body.trim().to_string(),
        };
        validate_blog(&blog.title, &blog.body, blog.summary.as_deref())?;
        Ok(blog)
    }
}
