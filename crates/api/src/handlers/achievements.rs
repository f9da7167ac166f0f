//! Handlers for the `/achievements` resource.

use alumni_core::types::DbId;
use alumni_db::models::achievement::{Achievement, CreateAchievement, NewAchievement};
use alumni_db::models::moderation::{
    ModerationListParams, SubmissionAuthor, UpdateModerationStatus,
};
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;

use super::moderation::{self, SubmitResponse};
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/achievements
///
/// `achieved_on` may not lie in the future.
pub async fn submit_achievement(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateAchievement>,
) -> AppResult<SubmitResponse<Achievement>> {
    let author = SubmissionAuthor::new(Some(auth.user_id), &auth.display_name)?;
    let today = Utc::now().date_naive();
    let achievement = NewAchievement::new(author, &input, today)?;
    moderation::submit(&state, achievement).await
}

/// GET /api/v1/achievements
pub async fn list_achievements(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ModerationListParams>,
) -> AppResult<Json<DataResponse<Vec<Achievement>>>> {
    let achievements = moderation::list::<Achievement>(&state, &auth, params).await?;
    Ok(Json(DataResponse { data: achievements }))
}

/// GET /api/v1/achievements/published
pub async fn list_published_achievements(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Achievement>>>> {
    let achievements = moderation::list_published::<Achievement>(&state, params).await?;
    Ok(Json(DataResponse { data: achievements }))
}

/// GET /api/v1/achievements/{id}
pub async fn get_achievement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Achievement>>> {
    let achievement = moderation::get::<Achievement>(&state, &auth, id).await?;
    Ok(Json(DataResponse { data: achievement }))
}

/// PUT /api/v1/achievements/{id}/status
pub async fn update_achievement_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateModerationStatus>,
) -> AppResult<Json<DataResponse<Achievement>>> {
    let achievement = moderation::transition::<Achievement>(&state, &admin, id, input).await?;
    Ok(Json(DataResponse { data: achievement }))
}
