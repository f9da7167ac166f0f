//! Moderation workflow shared by the achievement, blog and registration
//! request handlers.
//!
//! The per-kind handler modules validate their payloads and pick the
//! authorization extractor; everything after that (dedup-safe submit,
//! scoped listing, visibility checks, status transitions) lives here.

use alumni_core::error::CoreError;
use alumni_core::moderation::{parse_status_filter, ModerationStatus, Transition};
use alumni_core::search::{
    clamp_limit, clamp_offset, normalize_search, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use alumni_core::submission::{normalize_identity, normalize_optional};
use alumni_core::types::DbId;
use alumni_db::models::moderation::{
    ModeratedRecord, ModerationFilter, ModerationListParams, Submitted, UpdateModerationStatus,
};
use alumni_db::repositories::{ModerationRepo, NewSubmission};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::{dispatch, StatusChangeEvent};
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response of a submit endpoint: 201 for a new record, 200 for a reused one.
pub type SubmitResponse<T> = (StatusCode, Json<DataResponse<Submitted<T>>>);

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// Submit a validated record, suppressing duplicates inside the configured
/// dedup window.
pub(crate) async fn submit<N: NewSubmission>(
    state: &AppState,
    input: N,
) -> AppResult<SubmitResponse<N::Record>> {
    let submitted = ModerationRepo::submit(&state.pool, &input, state.config.dedup_window).await?;
    let kind = <N::Record as ModeratedRecord>::TABLE;

    let status = if submitted.reused {
        tracing::info!(
            kind,
            id = submitted.record.id(),
            author = %input.author_identity(),
            "Duplicate submission reused existing record",
        );
        StatusCode::OK
    } else {
        tracing::info!(
            kind,
            id = submitted.record.id(),
            author = %input.author_identity(),
            "Submission created",
        );
        StatusCode::CREATED
    };

    Ok((status, Json(DataResponse { data: submitted })))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// List records matching `params`.
///
/// Admins may filter by any author. Everyone else is scoped to their own
/// submissions regardless of the `author` parameter.
pub(crate) async fn list<T: ModeratedRecord>(
    state: &AppState,
    auth: &AuthUser,
    params: ModerationListParams,
) -> AppResult<Vec<T>> {
    let author_identity = if auth.is_admin() {
        normalize_optional(params.author.as_deref()).map(|a| normalize_identity(&a))
    } else {
        Some(normalize_identity(&auth.display_name))
    };

    let filter = ModerationFilter {
        status: parse_status_filter(params.status.as_deref())?,
        author_identity,
        search: normalize_search(params.search.as_deref())?,
        limit: clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        offset: clamp_offset(params.offset),
    };

    Ok(ModerationRepo::list_filtered::<T>(&state.pool, &filter).await?)
}

/// List approved records for the public site.
pub(crate) async fn list_published<T: ModeratedRecord>(
    state: &AppState,
    params: SearchParams,
) -> AppResult<Vec<T>> {
    let filter = ModerationFilter {
        status: Some(ModerationStatus::Approved),
        author_identity: None,
        search: normalize_search(params.search.as_deref())?,
        limit: clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        offset: clamp_offset(params.offset),
    };

    Ok(ModerationRepo::list_filtered::<T>(&state.pool, &filter).await?)
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// Fetch one record.
///
/// Admins can view any record, authors their own, everyone else only
/// approved ones. A record the caller may not see is reported as missing.
pub(crate) async fn get<T: ModeratedRecord>(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<T> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: T::ENTITY,
            id,
        })
    };

    let record = ModerationRepo::find_by_id::<T>(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let is_author = record.author_identity() == normalize_identity(&auth.display_name);
    if !auth.is_admin() && !is_author && !record.status()?.is_public() {
        tracing::debug!(kind = T::TABLE, id, user_id = auth.user_id, "Unpublished record hidden");
        return Err(not_found());
    }

    Ok(record)
}

// ---------------------------------------------------------------------------
// Status transition
// ---------------------------------------------------------------------------

/// Apply an administrator's status decision.
///
/// Callers must have already checked the admin role. Requesting the
/// current status returns the record untouched; an effective change is
/// logged and handed to the notification hook.
pub(crate) async fn transition<T: ModeratedRecord>(
    state: &AppState,
    admin: &AuthUser,
    id: DbId,
    input: UpdateModerationStatus,
) -> AppResult<T> {
    let requested = ModerationStatus::parse(input.status.trim())?;

    let change = ModerationRepo::update_status::<T>(&state.pool, id, requested, admin.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: T::ENTITY,
            id,
        }))?;

    match change.transition {
        Transition::Changed { from, to } => {
            tracing::info!(
                kind = T::TABLE,
                id,
                from = %from,
                to = %to,
                user_id = admin.user_id,
                "Moderation status updated",
            );
            dispatch(
                state.notifier.clone(),
                StatusChangeEvent {
                    kind: T::TABLE,
                    record_id: id,
                    author_identity: change.record.author_identity().to_string(),
                    from,
                    to,
                    reviewed_by: admin.user_id,
                },
            );
        }
        Transition::Unchanged => {
            tracing::debug!(
                kind = T::TABLE,
                id,
                status = %requested,
                "Status unchanged; nothing written",
            );
        }
    }

    Ok(change.record)
}
