//! Repository for the `blogs` table.
//!
//! Reads and status changes go through
//! [`ModerationRepo`](super::ModerationRepo); this module only owns the insert.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::moderation_repo::NewSubmission;
use crate::models::blog::{Blog, NewBlog};
use crate::models::moderation::ModeratedRecord;

/// Provides blog-specific writes.
pub struct BlogRepo;

impl BlogRepo {
    /// Insert a new pending blog post, returning the full row.
    pub async fn insert(conn: &mut PgConnection, input: &NewBlog) -> Result<Blog, sqlx::Error> {
        let query = format!(
            "INSERT INTO blogs (author_id, author_identity, title, summary, body) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            Blog::COLUMNS
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(input.author.user_id)
            .bind(&input.author.identity)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.body)
            .fetch_one(conn)
            .await
    }
}

#[async_trait]
impl NewSubmission for NewBlog {
    type Record = Blog;

    fn author_identity(&self) -> &str {
        &self.author.identity
    }

    fn dedup_key(&self) -> &str {
        &self.title
    }

    async fn insert(&self, conn: &mut PgConnection) -> Result<Blog, sqlx::Error> {
        BlogRepo::insert(conn, self).await
    }
}
