//! Repository for the `achievements` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::moderation_repo::NewSubmission;
use crate::models::achievement::{Achievement, NewAchievement};
use crate::models::moderation::ModeratedRecord;

/// Provides achievement-specific writes.
pub struct AchievementRepo;

impl AchievementRepo {
    /// Insert a new pending achievement, returning the full row.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &NewAchievement,
    ) -> Result<Achievement, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievements \
                (author_id, author_identity, title, description, category, achieved_on) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            Achievement::COLUMNS
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(input.author.user_id)
            .bind(&input.author.identity)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.achieved_on)
            .fetch_one(conn)
            .await
    }
}

#[async_trait]
impl NewSubmission for NewAchievement {
    type Record = Achievement;

    fn author_identity(&self) -> &str {
        &self.author.identity
    }

    fn dedup_key(&self) -> &str {
        &self.title
    }

    async fn insert(&self, conn: &mut PgConnection) -> Result<Achievement, sqlx::Error> {
        AchievementRepo::insert(conn, self).await
    }
}
