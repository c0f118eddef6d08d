//! Invitation handlers.

use axum::extract::{Query, State};
use axum::Json;
use validator::Validate;

use crate::dto::request::{AcceptInviteQuery, CreateInviteRequest};
use crate::dto::response::{ApiResponse, InviteResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `POST /api/invites`
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateInviteRequest>,
) -> Result<Json<ApiResponse<InviteResponse>>, ApiError> {
    payload.validate()?;

    let outcome = state
        .invite_service
        .create(user.context(), payload.email, payload.role_name)
        .await?;

    Ok(Json(ApiResponse::ok(InviteResponse {
        id: outcome.invite.id,
        email: outcome.invite.email,
        role_name: outcome.invite.role_name,
        token: outcome.token,
    })))
}

/// `GET /api/accept-invite?token=...`
///
/// Public endpoint. The signed token is the only credential.
pub async fn accept(
    State(state): State<AppState>,
    Query(query): Query<AcceptInviteQuery>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.invite_service.accept(&query.token).await?;

    Ok(Json(ApiResponse::ok(user.into())))
}
