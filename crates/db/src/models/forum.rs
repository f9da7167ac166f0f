//! Discussion forum models and DTOs.

use alumni_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `forum_threads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ForumThread {
    pub id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub title: String,
    pub body: String,
    pub reply_count: i32,
    pub last_activity_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `forum_replies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ForumReply {
    pub id: DbId,
    pub thread_id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A thread together with its replies, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadWithReplies {
    #[serde(flatten)]
    pub thread: ForumThread,
    pub replies: Vec<ForumReply>,
}

/// Request body for `POST /forum/threads`.
#[derive(Debug, Deserialize)]
pub struct CreateThread {
    pub title: String,
    pub body: String,
}

/// Request body for `POST /forum/threads/{id}/replies`.
#[derive(Debug, Deserialize)]
pub struct CreateReply {
    pub body: String,
}

/// Query parameters for listing threads.
#[derive(Debug, Deserialize)]
pub struct ThreadListParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
