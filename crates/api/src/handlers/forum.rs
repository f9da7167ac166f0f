//! Handlers for the discussion forum (`/forum`).
//!
//! Every endpoint requires a logged-in member. Posts may be deleted by
//! their author or by an admin.

use alumni_core::error::CoreError;
use alumni_core::forum::{ensure_can_delete, validate_reply, validate_thread};
use alumni_core::search::{
    clamp_limit, clamp_offset, normalize_search, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use alumni_core::submission::{normalize_identity, validate_author_identity};
use alumni_core::types::DbId;
use alumni_db::models::forum::{
    CreateReply, CreateThread, ForumReply, ForumThread, ThreadListParams, ThreadWithReplies,
};
use alumni_db::repositories::ForumRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn thread_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ForumThread",
        id,
    })
}

fn author_name(auth: &AuthUser) -> Result<String, CoreError> {
    let name = normalize_identity(&auth.display_name);
    validate_author_identity(&name)?;
    Ok(name)
}

// ---------------------------------------------------------------------------
// Threads
// ---------------------------------------------------------------------------

/// GET /api/v1/forum/threads
pub async fn list_threads(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ThreadListParams>,
) -> AppResult<Json<DataResponse<Vec<ForumThread>>>> {
    let search = normalize_search(params.search.as_deref())?;
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let threads = ForumRepo::list_threads(&state.pool, search.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: threads }))
}

/// POST /api/v1/forum/threads
pub async fn create_thread(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateThread>,
) -> AppResult<(StatusCode, Json<DataResponse<ForumThread>>)> {
    let title = input.title.trim();
    let body = input.body.trim();
    validate_thread(title, body)?;
    let name = author_name(&auth)?;

    let thread = ForumRepo::create_thread(&state.pool, auth.user_id, &name, title, body).await?;

    tracing::info!(thread_id = thread.id, user_id = auth.user_id, "Forum thread created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: thread })))
}

/// GET /api/v1/forum/threads/{id}
///
/// The thread with its replies, oldest first.
pub async fn get_thread(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ThreadWithReplies>>> {
    let thread = ForumRepo::find_thread(&state.pool, id)
        .await?
        .ok_or_else(|| thread_not_found(id))?;
    let replies = ForumRepo::list_replies(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: ThreadWithReplies { thread, replies },
    }))
}

/// DELETE /api/v1/forum/threads/{id}
pub async fn delete_thread(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let thread = ForumRepo::find_thread(&state.pool, id)
        .await?
        .ok_or_else(|| thread_not_found(id))?;
    ensure_can_delete(thread.author_id, auth.user_id, &auth.role)?;

    if !ForumRepo::delete_thread(&state.pool, id).await? {
        return Err(thread_not_found(id));
    }

    tracing::info!(thread_id = id, user_id = auth.user_id, "Forum thread deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// POST /api/v1/forum/threads/{id}/replies
pub async fn create_reply(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(thread_id): Path<DbId>,
    JsonBody(input): JsonBody<CreateReply>,
) -> AppResult<(StatusCode, Json<DataResponse<ForumReply>>)> {
    let body = input.body.trim();
    validate_reply(body)?;
    let name = author_name(&auth)?;

    let reply = ForumRepo::create_reply(&state.pool, thread_id, auth.user_id, &name, body)
        .await?
        .ok_or_else(|| thread_not_found(thread_id))?;

    tracing::info!(
        thread_id,
        reply_id = reply.id,
        user_id = auth.user_id,
        "Forum reply posted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: reply })))
}

/// DELETE /api/v1/forum/replies/{id}
pub async fn delete_reply(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "ForumReply",
            id,
        })
    };

    let reply = ForumRepo::find_reply(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    ensure_can_delete(reply.author_id, auth.user_id, &auth.role)?;

    if !ForumRepo::delete_reply(&state.pool, id).await? {
        return Err(not_found());
    }

    tracing::info!(reply_id = id, user_id = auth.user_id, "Forum reply deleted");
    Ok(StatusCode::NO_CONTENT)
}
