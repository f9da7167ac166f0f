//! Handlers for the `/registration-requests` resource.
//!
//! Prospective members apply without an account; only admins can read or
//! decide on applications.

use alumni_core::types::DbId;
use alumni_db::models::moderation::{ModerationListParams, UpdateModerationStatus};
use alumni_db::models::registration_request::{
    CreateRegistrationRequest, NewRegistrationRequest, RegistrationRequest,
};
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Datelike, Utc};

use super::moderation::{self, SubmitResponse};
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/registration-requests
///
/// Public. The applicant's e-mail is the author identity and the
/// registration number is the dedup key.
pub async fn submit_registration_request(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateRegistrationRequest>,
) -> AppResult<SubmitResponse<RegistrationRequest>> {
    let request = NewRegistrationRequest::new(&input, Utc::now().year())?;
    moderation::submit(&state, request).await
}

/// GET /api/v1/registration-requests
pub async fn list_registration_requests(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ModerationListParams>,
) -> AppResult<Json<DataResponse<Vec<RegistrationRequest>>>> {
    let requests = moderation::list::<RegistrationRequest>(&state, &admin, params).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/registration-requests/{id}
pub async fn get_registration_request(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RegistrationRequest>>> {
    let request = moderation::get::<RegistrationRequest>(&state, &admin, id).await?;
    Ok(Json(DataResponse { data: request }))
}

/// PUT /api/v1/registration-requests/{id}/status
pub async fn update_registration_request_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateModerationStatus>,
) -> AppResult<Json<DataResponse<RegistrationRequest>>> {
    let request =
        moderation::transition::<RegistrationRequest>(&state, &admin, id, input).await?;
    Ok(Json(DataResponse { data: request }))
}
