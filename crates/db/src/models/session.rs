//! Refresh-token sessions.
//!
//! A session backs one refresh token. It ends either by expiring or by
//! being revoked, and the revocation records why so a reused rotated token
//! can be told apart from a logout.

use alumni_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    /// One of [`RevokeReason`]'s values once revoked.
    pub revoked_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserSession {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// Why a session stopped being usable before it expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeReason {
    /// Its refresh token was exchanged for a new one.
    Rotated,
    /// The user logged out.
    Logout,
    /// An administrator deactivated the account.
    Deactivated,
}

impl RevokeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rotated => "rotated",
            Self::Logout => "logout",
            Self::Deactivated => "deactivated",
        }
    }
}

/// Insert payload for a new session.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
