//! Role registry handlers.

use axum::extract::State;
use axum::Json;
use validator::Validate;

use docsuite_entity::role::{CreateRole, Role};

use crate::dto::request::CreateRoleRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `GET /api/roles`
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<Role>>>, ApiError> {
    let roles = state.role_service.list(user.context()).await?;

    Ok(Json(ApiResponse::ok(roles)))
}

/// `POST /api/roles`
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateRoleRequest>,
) -> Result<Json<ApiResponse<Role>>, ApiError> {
    payload.validate()?;

    let role = state
        .role_service
        .create(
            user.context(),
            CreateRole {
                name: payload.name,
                system_id: payload.system_id,
                description: payload.description,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(role)))
}
