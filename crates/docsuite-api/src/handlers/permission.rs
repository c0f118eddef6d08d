//! Permission grant handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use docsuite_auth::access::Access;
use docsuite_entity::permission::{GroupPermission, Permission};
use docsuite_service::permission::GrantPermissionRequest as GrantRequest;

use crate::dto::request::{CheckAccessQuery, GrantPermissionRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

fn into_grant(payload: GrantPermissionRequest) -> GrantRequest {
    GrantRequest {
        system_id: payload.system_id,
        role_id: payload.role_id,
        expiry: payload.expiry,
    }
}

/// `GET /api/permissions/users/{id}`
pub async fn list_for_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Permission>>>, ApiError> {
    let grants = state
        .permission_service
        .list_for_user(user.context(), user_id)
        .await?;

    Ok(Json(ApiResponse::ok(grants)))
}

/// `POST /api/permissions/users/{id}`
pub async fn grant_to_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<GrantPermissionRequest>,
) -> Result<Json<ApiResponse<Permission>>, ApiError> {
    payload.validate()?;

    let grant = state
        .permission_service
        .grant_to_user(user.context(), user_id, into_grant(payload))
        .await?;

    Ok(Json(ApiResponse::ok(grant)))
}

/// `DELETE /api/permissions/users/{id}/{permission_id}`
pub async fn revoke_from_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path((user_id, permission_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<Permission>>, ApiError> {
    let revoked = state
        .permission_service
        .revoke_from_user(user.context(), user_id, permission_id)
        .await?;

    Ok(Json(ApiResponse::ok(revoked)))
}

/// `GET /api/permissions/groups/{id}`
pub async fn list_for_group(
    State(state): State<AppState>,
    user: AuthUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<GroupPermission>>>, ApiError> {
    let grants = state
        .permission_service
        .list_for_group(user.context(), group_id)
        .await?;

    Ok(Json(ApiResponse::ok(grants)))
}

/// `POST /api/permissions/groups/{id}`
pub async fn grant_to_group(
    State(state): State<AppState>,
    user: AuthUser,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<GrantPermissionRequest>,
) -> Result<Json<ApiResponse<GroupPermission>>, ApiError> {
    payload.validate()?;

    let grant = state
        .permission_service
        .grant_to_group(user.context(), group_id, into_grant(payload))
        .await?;

    Ok(Json(ApiResponse::ok(grant)))
}

/// `DELETE /api/permissions/groups/{id}/{permission_id}`
pub async fn revoke_from_group(
    State(state): State<AppState>,
    user: AuthUser,
    Path((group_id, permission_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<GroupPermission>>, ApiError> {
    let revoked = state
        .permission_service
        .revoke_from_group(user.context(), group_id, permission_id)
        .await?;

    Ok(Json(ApiResponse::ok(revoked)))
}

/// `GET /api/permissions/check?system=...&role=...`
///
/// Checks the caller's own access. Never returns 403; the decision is
/// the response body.
pub async fn check(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CheckAccessQuery>,
) -> Result<Json<ApiResponse<Access>>, ApiError> {
    let access = state
        .permission_service
        .check(user.context(), &query.system, &query.role)
        .await?;

    Ok(Json(ApiResponse::ok(access)))
}
