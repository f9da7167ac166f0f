//! Achievement entity model and DTOs.

use alumni_core::achievement::validate_achievement;
use alumni_core::error::CoreError;
use alumni_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::moderation::{ModeratedRecord, SubmissionAuthor};

/// A row from the `achievements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub author_id: Option<DbId>,
    pub author_identity: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub achieved_on: Option<NaiveDate>,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ModeratedRecord for Achievement {
    const TABLE: &'static str = "achievements";
    const ENTITY: &'static str = "Achievement";
    const COLUMNS: &'static str = "\
        id, author_id, author_identity, title, description, category, achieved_on, \
        status, reviewed_by, created_at, updated_at";
    const DEDUP_COLUMN: &'static str = "title";
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "description", "category"];

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

/// Request body for submitting an achievement.
#[derive(Debug, Deserialize)]
pub struct CreateAchievement {
    pub title: String,
    pub description: String,
    pub category: String,
    pub achieved_on: Option<NaiveDate>,
}

/// A validated, normalised achievement ready for insert.
#[derive(Debug, Clone)]
pub struct NewAchievement {
    pub author: SubmissionAuthor,
    pub title: String,
    pub description: String,
    pub category: String,
    pub achieved_on: Option<NaiveDate>,
}

impl NewAchievement {
    /// Normalise and validate a submission from `author`. `today` bounds
    /// the achievement date.
    pub fn new(
        author: SubmissionAuthor,
        input: &CreateAchievement,
        today: NaiveDate,
    ) -> Result<Self, CoreError> {
        let achievement = Self {
            author,
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            category: input.category.trim().to_lowercase(),
            achieved_on: input.achieved_on,
        };
        validate_achievement(
            &achievement.title,
            &achievement.description,
            &achievement.category,
            achievement.achieved_on,
            today,
        )?;
        Ok(achievement)
    }
}
