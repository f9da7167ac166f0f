//! Role gate for moderation and account management.
//!
//! Administrators are the only reviewers: every status transition, every
//! read of registration requests and contact queries, and all user
//! management goes through [`RequireAdmin`]. Member-level endpoints take
//! [`AuthUser`] directly.

use alumni_core::error::CoreError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An authenticated administrator. Rejects other members with 403.
///
/// Denied attempts are logged with the caller and route.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!(
                user_id = user.user_id,
                role = %user.role,
                method = %parts.method,
                path = %parts.uri.path(),
                "Admin-only route refused",
            );
            return Err(AppError::Core(CoreError::Forbidden(
                "Only administrators can review submissions or manage accounts".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
