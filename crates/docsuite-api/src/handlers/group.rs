//! Group management handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use docsuite_entity::group::{CreateGroup, Group};

use crate::dto::request::{AddMemberRequest, CreateGroupRequest};
use crate::dto::response::{ApiResponse, MessageResponse, PaginatedResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// `GET /api/groups`
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<Group>>>, ApiError> {
    let page = state
        .group_service
        .list(user.context(), &pagination.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page.into())))
}

/// `GET /api/groups/{id}`
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Group>>, ApiError> {
    let group = state.group_service.get(user.context(), group_id).await?;

    Ok(Json(ApiResponse::ok(group)))
}

/// `POST /api/groups`
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateGroupRequest>,
) -> Result<Json<ApiResponse<Group>>, ApiError> {
    payload.validate()?;

    let group = state
        .group_service
        .create(
            user.context(),
            CreateGroup {
                name: payload.name,
                description: payload.description,
                initial_user_ids: payload.initial_user_ids,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(group)))
}

/// `GET /api/groups/{id}/members`
pub async fn members(
    State(state): State<AppState>,
    user: AuthUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    let members = state.group_service.members(user.context(), group_id).await?;

    let members = members.into_iter().map(UserResponse::from).collect();

    Ok(Json(ApiResponse::ok(members)))
}

/// `POST /api/groups/{id}/members`
pub async fn add_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .group_service
        .add_member(user.context(), group_id, payload.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Member added".to_owned(),
    })))
}

/// `DELETE /api/groups/{id}/members/{user_id}`
pub async fn remove_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path((group_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .group_service
        .remove_member(user.context(), group_id, member_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Member removed".to_owned(),
    })))
}
