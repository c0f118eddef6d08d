//! Authentication handlers.

use axum::extract::State;
use axum::Json;
use validator::Validate;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

fn login_response(outcome: docsuite_service::auth::LoginOutcome) -> LoginResponse {
    LoginResponse {
        access_token: outcome.tokens.access_token,
        refresh_token: outcome.tokens.refresh_token,
        access_expires_at: outcome.tokens.access_expires_at,
        refresh_expires_at: outcome.tokens.refresh_expires_at,
        user: outcome.user.into(),
    }
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    payload.validate()?;

    let outcome = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(ApiResponse::ok(login_response(outcome))))
}

/// `POST /api/auth/logout`
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.auth_service.logout(user.context()).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out".to_owned(),
    })))
}

/// `POST /api/auth/refresh`
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let outcome = state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(ApiResponse::ok(login_response(outcome))))
}

/// `GET /api/auth/me`
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let current = state.auth_service.current_user(user.context()).await?;

    Ok(Json(ApiResponse::ok(current.into())))
}
