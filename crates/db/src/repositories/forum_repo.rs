//! Repository for the `forum_threads` and `forum_replies` tables.

use alumni_core::search::ilike_pattern;
use alumni_core::types::DbId;
use sqlx::PgPool;

use crate::models::forum::{ForumReply, ForumThread};

/// Column list for `forum_threads` queries.
const THREAD_COLUMNS: &str = "\
    id, author_id, author_name, title, body, reply_count, last_activity_at, \
    created_at, updated_at";

/// Column list for `forum_replies` queries.
const REPLY_COLUMNS: &str = "id, thread_id, author_id, author_name, body, created_at, updated_at";

/// Provides CRUD operations for forum threads and replies.
pub struct ForumRepo;

impl ForumRepo {
    /// Create a thread, returning the full row.
    pub async fn create_thread(
        pool: &PgPool,
        author_id: DbId,
        author_name: &str,
        title: &str,
        body: &str,
    ) -> Result<ForumThread, sqlx::Error> {
        let query = format!(
            "INSERT INTO forum_threads (author_id, author_name, title, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {THREAD_COLUMNS}"
        );
        sqlx::query_as::<_, ForumThread>(&query)
            .bind(author_id)
            .bind(author_name)
            .bind(title)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Find a thread by ID.
    pub async fn find_thread(pool: &PgPool, id: DbId) -> Result<Option<ForumThread>, sqlx::Error> {
        let query = format!("SELECT {THREAD_COLUMNS} FROM forum_threads WHERE id = $1");
        sqlx::query_as::<_, ForumThread>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List threads by most recent activity, optionally searching title,
    /// body and author name.
    pub async fn list_threads(
        pool: &PgPool,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ForumThread>, sqlx::Error> {
        let (where_clause, limit_idx) = if search.is_some() {
            (
                "WHERE title ILIKE $1 OR body ILIKE $1 OR author_name ILIKE $1",
                2,
            )
        } else {
            ("", 1)
        };
        let query = format!(
            "SELECT {THREAD_COLUMNS} FROM forum_threads {where_clause} \
             ORDER BY last_activity_at DESC, id DESC \
             LIMIT ${limit_idx} OFFSET ${}",
            limit_idx + 1
        );

        let mut q = sqlx::query_as::<_, ForumThread>(&query);
        if let Some(term) = search {
            q = q.bind(ilike_pattern(term));
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Delete a thread and, by cascade, its replies. Returns `true` if a
    /// row was deleted.
    pub async fn delete_thread(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM forum_threads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add a reply and bump the thread's reply count and activity time.
    ///
    /// Returns `None` if the thread does not exist.
    pub async fn create_reply(
        pool: &PgPool,
        thread_id: DbId,
        author_id: DbId,
        author_name: &str,
        body: &str,
    ) -> Result<Option<ForumReply>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let bumped = sqlx::query(
            "UPDATE forum_threads SET reply_count = reply_count + 1, last_activity_at = NOW() \
             WHERE id = $1",
        )
        .bind(thread_id)
        .execute(&mut *tx)
        .await?;
        if bumped.rows_affected() == 0 {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO forum_replies (thread_id, author_id, author_name, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {REPLY_COLUMNS}"
        );
        let reply = sqlx::query_as::<_, ForumReply>(&query)
            .bind(thread_id)
            .bind(author_id)
            .bind(author_name)
            .bind(body)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(reply))
    }

    /// Find a reply by ID.
    pub async fn find_reply(pool: &PgPool, id: DbId) -> Result<Option<ForumReply>, sqlx::Error> {
        let query = format!("SELECT {REPLY_COLUMNS} FROM forum_replies WHERE id = $1");
        sqlx::query_as::<_, ForumReply>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a thread's replies, oldest first.
    pub async fn list_replies(
        pool: &PgPool,
        thread_id: DbId,
    ) -> Result<Vec<ForumReply>, sqlx::Error> {
        let query = format!(
            "SELECT {REPLY_COLUMNS} FROM forum_replies \
             WHERE thread_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ForumReply>(&query)
            .bind(thread_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a reply and decrement its thread's reply count. Returns
    /// `true` if a row was deleted.
    pub async fn delete_reply(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted: Option<(DbId,)> =
            sqlx::query_as("DELETE FROM forum_replies WHERE id = $1 RETURNING thread_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((thread_id,)) = deleted else {
            return Ok(false);
        };

        sqlx::query(
            "UPDATE forum_threads SET reply_count = GREATEST(reply_count - 1, 0) WHERE id = $1",
        )
        .bind(thread_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
