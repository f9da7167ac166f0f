//! Repository for refresh-token sessions (`user_sessions`).

use alumni_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::session::{CreateSession, RevokeReason, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, revoked_at, \
                       revoked_reason, created_at, updated_at";

/// Session storage for login, refresh rotation and logout.
pub struct SessionRepo;

impl SessionRepo {
    /// Store a new session for a freshly issued refresh token.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a session by refresh token hash, whatever its state.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_sessions WHERE refresh_token_hash = $1");
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Consume a live refresh token: mark its session `rotated` and return it.
    ///
    /// The check and the revocation are one statement, so a token can be
    /// exchanged at most once even under concurrent refreshes. Returns `None`
    /// for unknown, expired or already revoked tokens.
    pub async fn rotate(pool: &PgPool, hash: &str) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions
             SET revoked_at = NOW(), revoked_reason = $2
             WHERE refresh_token_hash = $1
               AND revoked_at IS NULL
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .bind(RevokeReason::Rotated.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Revoke every live session of a user. Returns how many were revoked.
    pub async fn revoke_all_for_user(
        pool: &PgPool,
        user_id: DbId,
        reason: RevokeReason,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions
             SET revoked_at = NOW(), revoked_reason = $2
             WHERE user_id = $1 AND revoked_at IS NULL AND expires_at > NOW()",
        )
        .bind(user_id)
        .bind(reason.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a user's sessions that can no longer be used (expired, or
    /// revoked before `revoked_before`). Called on login to keep the table
    /// bounded per user.
    pub async fn purge_stale_for_user(
        pool: &PgPool,
        user_id: DbId,
        revoked_before: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_sessions
             WHERE user_id = $1
               AND (expires_at <= NOW() OR revoked_at < $2)",
        )
        .bind(user_id)
        .bind(revoked_before)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
