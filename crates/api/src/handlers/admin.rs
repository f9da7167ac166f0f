//! Handlers for the `/admin` resource (user management, moderation summary).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use alumni_core::error::CoreError;
use alumni_core::registration::{normalize_email, validate_email};
use alumni_core::roles::VALID_ROLES;
use alumni_core::submission::{normalize_identity, validate_author_identity};
use alumni_core::types::DbId;
use alumni_db::models::achievement::Achievement;
use alumni_db::models::blog::Blog;
use alumni_db::models::moderation::StatusCount;
use alumni_db::models::registration_request::RegistrationRequest;
use alumni_db::models::session::RevokeReason;
use alumni_db::models::user::{CreateUser, UpdateUser, UserResponse};
use alumni_db::repositories::{ModerationRepo, SessionRepo, UserRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
    pub role: String,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Per-status record counts for each moderated kind.
#[derive(Debug, Serialize)]
pub struct ModerationSummary {
    pub achievements: Vec<StatusCount>,
    pub blogs: Vec<StatusCount>,
    pub registration_requests: Vec<StatusCount>,
}

fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a new account. Returns the safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    JsonBody(input): JsonBody<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let email = normalize_email(&input.email);
    validate_email(&email)?;
    let display_name = normalize_identity(&input.display_name);
    validate_author_identity(&display_name)?;
    validate_role(&input.role)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        email,
        display_name,
        password_hash: hashed,
        role: input.role,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(
        user_id = user.id,
        role = %user.role,
        created_by = admin.user_id,
        "User created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let data = users.iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update display name, role or active flag. Display-name changes apply to
/// future submissions only; existing records keep the identity they were
/// submitted under. Deactivating a user revokes their refresh tokens.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let display_name = match input.display_name.as_deref() {
        Some(raw) => {
            let name = normalize_identity(raw);
            validate_author_identity(&name)?;
            Some(name)
        }
        None => None,
    };
    if let Some(role) = input.role.as_deref() {
        validate_role(role)?;
    }

    let update_dto = UpdateUser {
        display_name,
        role: input.role,
        is_active: input.is_active,
    };
    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, updated_by = admin.user_id, "User updated");

    if update_dto.is_active == Some(false) {
        let revoked =
            SessionRepo::revoke_all_for_user(&state.pool, id, RevokeReason::Deactivated).await?;
        tracing::info!(user_id = id, revoked, "Sessions revoked for deactivated user");
    }

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

// ---------------------------------------------------------------------------
// Moderation summary
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/moderation/summary
///
/// Record counts per status for each moderated kind. Statuses with no
/// records are omitted.
pub async fn moderation_summary(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<ModerationSummary>>> {
    let achievements = ModerationRepo::count_by_status::<Achievement>(&state.pool).await?;
    let blogs = ModerationRepo::count_by_status::<Blog>(&state.pool).await?;
    let registration_requests =
        ModerationRepo::count_by_status::<RegistrationRequest>(&state.pool).await?;

    Ok(Json(DataResponse {
        data: ModerationSummary {
            achievements,
            blogs,
            registration_requests,
        },
    }))
}
