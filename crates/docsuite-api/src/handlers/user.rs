//! Current-user profile handlers.

use axum::extract::State;
use axum::Json;
use validator::Validate;

use docsuite_entity::group::Group;
use docsuite_service::user::service::UpdateProfileRequest as ProfileUpdate;

use crate::dto::request::{ChangePasswordRequest, UpdateProfileRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `GET /api/users/me`
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let profile = state.user_service.get_profile(user.context()).await?;

    Ok(Json(ApiResponse::ok(profile.into())))
}

/// `PUT /api/users/me`
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let updated = state
        .user_service
        .update_profile(
            user.context(),
            ProfileUpdate {
                display_name: payload.display_name,
                email: payload.email,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(updated.into())))
}

/// `PUT /api/users/me/password`
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    payload.validate()?;

    state
        .user_service
        .change_password(
            user.context(),
            &payload.current_password,
            &payload.new_password,
        )
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Password changed".to_owned(),
    })))
}

/// `GET /api/users/me/groups`
pub async fn my_groups(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<Group>>>, ApiError> {
    let groups = state.user_service.my_groups(user.context()).await?;

    Ok(Json(ApiResponse::ok(groups)))
}
