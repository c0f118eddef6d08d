//! User administration handlers.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use docsuite_entity::user::UserStatus;
use docsuite_service::user::admin::AdminCreateUserRequest;

use crate::dto::request::{ChangeStatusRequest, CreateUserRequest, UpdateUserRequest, UserSearchQuery};
use crate::dto::response::{ApiResponse, PaginatedResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// `GET /api/admin/users`
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(search): Query<UserSearchQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<UserResponse>>>, ApiError> {
    let page = state
        .admin_user_service
        .list(
            user.context(),
            search.search.as_deref(),
            &pagination.into_page_request(),
        )
        .await?;

    let page = page.map(UserResponse::from);

    Ok(Json(ApiResponse::ok(page.into())))
}

/// `GET /api/admin/users/{id}`
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let found = state.admin_user_service.get(user.context(), user_id).await?;

    Ok(Json(ApiResponse::ok(found.into())))
}

/// `POST /api/admin/users`
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    payload.validate()?;

    let created = state
        .admin_user_service
        .create(
            user.context(),
            AdminCreateUserRequest {
                email: payload.email,
                username: payload.username,
                password: payload.password,
                display_name: payload.display_name,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(created.into())))
}

/// `PUT /api/admin/users/{id}`
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let updated = state
        .admin_user_service
        .update(user.context(), user_id, payload.email, payload.display_name)
        .await?;

    Ok(Json(ApiResponse::ok(updated.into())))
}

/// `PUT /api/admin/users/{id}/status`
pub async fn set_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ChangeStatusRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let status = UserStatus::from_str(&payload.status)?;

    let updated = state
        .admin_user_service
        .set_status(user.context(), user_id, status)
        .await?;

    Ok(Json(ApiResponse::ok(updated.into())))
}

/// `DELETE /api/admin/users/{id}`
///
/// Accounts are deactivated, never hard-deleted, so audit history
/// stays attributable.
pub async fn deactivate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let updated = state
        .admin_user_service
        .deactivate(user.context(), user_id)
        .await?;

    Ok(Json(ApiResponse::ok(updated.into())))
}
