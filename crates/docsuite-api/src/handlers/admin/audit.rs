//! Audit log handlers.

use std::str::FromStr;

use axum::extract::{Query, State};
use axum::Json;

use docsuite_entity::audit::{AuditAction, PermissionAudit};
use docsuite_service::audit::AuditFilter;

use crate::dto::request::AuditSearchQuery;
use crate::dto::response::{ApiResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// `GET /api/admin/audit`
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AuditSearchQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<PermissionAudit>>>, ApiError> {
    let action = match &query.action {
        Some(raw) => Some(AuditAction::from_str(raw)?),
        None => None,
    };

    let filter = AuditFilter {
        actor_id: query.actor_id,
        action,
        user_id: query.user_id,
    };

    let page = state
        .audit_service
        .search(user.context(), &filter, &pagination.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page.into())))
}
