//! Handlers for the `/blogs` resource.
//!
//! Logged-in members submit posts; admins approve or deny them; approved
//! posts are listed publicly.

use alumni_core::types::DbId;
use alumni_db::models::blog::{Blog, CreateBlog, NewBlog};
use alumni_db::models::moderation::{
    ModerationListParams, SubmissionAuthor, UpdateModerationStatus,
};
use axum::extract::{Path, Query, State};
use axum::Json;

use super::moderation::{self, SubmitResponse};
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/blogs
///
/// Returns 201 with the new post, or 200 with `reused: true` when the same
/// author sent the same title inside the dedup window.
pub async fn submit_blog(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateBlog>,
) -> AppResult<SubmitResponse<Blog>> {
    let author = SubmissionAuthor::new(Some(auth.user_id), &auth.display_name)?;
    let blog = NewBlog::new(author, &input)?;
    moderation::submit(&state, blog).await
}

/// GET /api/v1/blogs
pub async fn list_blogs(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ModerationListParams>,
) -> AppResult<Json<DataResponse<Vec<Blog>>>> {
    let blogs = moderation::list::<Blog>(&state, &auth, params).await?;
    Ok(Json(DataResponse { data: blogs }))
}

/// GET /api/v1/blogs/published
pub async fn list_published_blogs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Blog>>>> {
    let blogs = moderation::list_published::<Blog>(&state, params).await?;
    Ok(Json(DataResponse { data: blogs }))
}

/// GET /api/v1/blogs/{id}
pub async fn get_blog(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Blog>>> {
    let blog = moderation::get::<Blog>(&state, &auth, id).await?;
    Ok(Json(DataResponse { data: blog }))
}

/// PUT /api/v1/blogs/{id}/status
pub async fn update_blog_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateModerationStatus>,
) -> AppResult<Json<DataResponse<Blog>>> {
    let blog = moderation::transition::<Blog>(&state, &admin, id, input).await?;
    Ok(Json(DataResponse { data: blog }))
}
