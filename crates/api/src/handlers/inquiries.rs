//! Handlers for the `/queries` resource ("Contact us" messages).
//!
//! Anyone may send a query; only admins can read and resolve them.

use alumni_core::error::CoreError;
use alumni_core::search::{
    clamp_limit, clamp_offset, normalize_search, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
use alumni_core::types::DbId;
use alumni_db::models::inquiry::{CreateInquiry, Inquiry, InquiryListParams};
use alumni_db::repositories::InquiryRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/queries
pub async fn create_inquiry(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateInquiry>,
) -> AppResult<(StatusCode, Json<DataResponse<Inquiry>>)> {
    let input = input.normalized()?;
    let inquiry = InquiryRepo::create(&state.pool, &input).await?;

    tracing::info!(inquiry_id = inquiry.id, "Contact query received");

    Ok((StatusCode::CREATED, Json(DataResponse { data: inquiry })))
}

/// GET /api/v1/queries
///
/// Optional filters: `resolved`, `search`, `limit`, `offset`.
pub async fn list_inquiries(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<InquiryListParams>,
) -> AppResult<Json<DataResponse<Vec<Inquiry>>>> {
    let search = normalize_search(params.search.as_deref())?;
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let inquiries =
        InquiryRepo::list_filtered(&state.pool, params.resolved, search.as_deref(), limit, offset)
            .await?;
    Ok(Json(DataResponse { data: inquiries }))
}

/// PUT /api/v1/queries/{id}/resolve
///
/// Idempotent: resolving an already-resolved query returns it unchanged.
pub async fn resolve_inquiry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Inquiry>>> {
    let inquiry = InquiryRepo::resolve(&state.pool, id, admin.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inquiry",
            id,
        }))?;

    tracing::info!(inquiry_id = id, user_id = admin.user_id, "Contact query resolved");

    Ok(Json(DataResponse { data: inquiry }))
}
