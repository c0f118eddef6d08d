//! Document handlers, generic over the document kind in the path.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use docsuite_core::error::AppError;
use docsuite_entity::document::{
    CreateDocument, Document, DocumentAction, DocumentCategory, DocumentKind, DocumentVersion,
    ReorderDirection, UpdateDocument,
};
use docsuite_service::document::DocumentFilter;

use crate::dto::request::{
    BulkActionRequest, CategoryListQuery, CreateCategoryRequest, CreateDocumentRequest,
    DeleteDocumentQuery, DocumentListQuery, PublishVersionRequest, SingleActionRequest,
    UpdateDocumentRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse, PaginatedResponse, UpdatedCountResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

fn parse_kind(kind: &str) -> Result<DocumentKind, AppError> {
    DocumentKind::from_str(kind)
}

fn parse_flag_action(action: &str) -> Result<DocumentAction, AppError> {
    match action {
        "archive" => Ok(DocumentAction::Archive),
        "unarchive" => Ok(DocumentAction::Unarchive),
        "approve" => Ok(DocumentAction::Approve),
        "unapprove" => Ok(DocumentAction::Unapprove),
        "highlight" => Ok(DocumentAction::Highlight),
        "unhighlight" => Ok(DocumentAction::Unhighlight),
        other => Err(AppError::validation(format!(
            "Unknown document action: '{other}'"
        ))),
    }
}

/// `GET /api/documents/{kind}`
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
    Query(filter): Query<DocumentListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<Document>>>, ApiError> {
    let kind = parse_kind(&kind)?;

    let page = state
        .document_service
        .list(
            user.context(),
            kind,
            &DocumentFilter {
                category_id: filter.category_id,
                include_archived: filter.include_archived,
            },
            &pagination.into_page_request(),
        )
        .await?;

    Ok(Json(ApiResponse::ok(page.into())))
}

/// `GET /api/documents/{kind}/{id}`
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let kind = parse_kind(&kind)?;

    let document = state.document_service.get(user.context(), kind, id).await?;

    Ok(Json(ApiResponse::ok(document)))
}

/// `POST /api/documents/{kind}`
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let kind = parse_kind(&kind)?;
    payload.validate()?;

    let document = state
        .document_service
        .create(
            user.context(),
            kind,
            CreateDocument {
                kind,
                title: payload.title,
                description: payload.description,
                category_id: payload.category_id,
                attachment_path: payload.attachment_path,
                review_date: payload.review_date,
                created_by: None,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(document)))
}

/// `PUT /api/documents/{kind}/{id}`
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateDocumentRequest>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let kind = parse_kind(&kind)?;

    let document = state
        .document_service
        .update(
            user.context(),
            kind,
            UpdateDocument {
                id,
                title: payload.title,
                description: payload.description,
                category_id: payload.category_id,
                attachment_path: payload.attachment_path,
                review_date: payload.review_date,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(document)))
}

/// `DELETE /api/documents/{kind}/{id}?permanent=true`
///
/// Without `permanent`, the record is archived rather than removed.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
    Query(query): Query<DeleteDocumentQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let kind = parse_kind(&kind)?;

    state
        .document_service
        .delete(user.context(), kind, id, query.permanent)
        .await?;

    let message = if query.permanent {
        "Document deleted"
    } else {
        "Document archived"
    };

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: message.to_owned(),
    })))
}

/// `PATCH /api/documents/{kind}/{id}`
///
/// Applies a single-record action: any flag action, `toggle_highlight`,
/// `move_up`, or `move_down`.
pub async fn apply_action(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
    Json(payload): Json<SingleActionRequest>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let kind = parse_kind(&kind)?;

    let document = match payload.action.as_str() {
        "toggle_highlight" => {
            state
                .document_service
                .toggle_highlight(user.context(), kind, id)
                .await?
        }
        "move_up" => {
            state
                .document_service
                .reorder(user.context(), kind, id, ReorderDirection::Up)
                .await?
        }
        "move_down" => {
            state
                .document_service
                .reorder(user.context(), kind, id, ReorderDirection::Down)
                .await?
        }
        other => {
            let action = parse_flag_action(other)?;
            state
                .document_service
                .apply_action(user.context(), kind, id, action)
                .await?
        }
    };

    Ok(Json(ApiResponse::ok(document)))
}

/// `PUT /api/documents/{kind}`
///
/// Applies a flag action to many documents at once.
pub async fn bulk_action(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
    Json(payload): Json<BulkActionRequest>,
) -> Result<Json<ApiResponse<UpdatedCountResponse>>, ApiError> {
    let kind = parse_kind(&kind)?;
    let action = parse_flag_action(&payload.action)?;

    let updated = state
        .document_service
        .bulk_action(user.context(), kind, &payload.ids, action)
        .await?;

    Ok(Json(ApiResponse::ok(UpdatedCountResponse { updated })))
}

/// `GET /api/documents/{kind}/{id}/versions`
pub async fn versions(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<Vec<DocumentVersion>>>, ApiError> {
    let kind = parse_kind(&kind)?;

    let versions = state
        .document_service
        .versions(user.context(), kind, id)
        .await?;

    Ok(Json(ApiResponse::ok(versions)))
}

/// `POST /api/documents/{kind}/{id}/versions`
pub async fn publish_version(
    State(state): State<AppState>,
    user: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
    Json(payload): Json<PublishVersionRequest>,
) -> Result<Json<ApiResponse<DocumentVersion>>, ApiError> {
    let kind = parse_kind(&kind)?;

    let version = state
        .document_service
        .publish_version(
            user.context(),
            kind,
            id,
            payload.notes,
            payload.attachment_path,
        )
        .await?;

    Ok(Json(ApiResponse::ok(version)))
}

/// `GET /api/documents/{kind}/categories`
pub async fn list_categories(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<ApiResponse<Vec<DocumentCategory>>>, ApiError> {
    let kind = parse_kind(&kind)?;

    let categories = state
        .document_service
        .list_categories(user.context(), kind, query.include_archived)
        .await?;

    Ok(Json(ApiResponse::ok(categories)))
}

/// `POST /api/documents/{kind}/categories`
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<Json<ApiResponse<DocumentCategory>>, ApiError> {
    let kind = parse_kind(&kind)?;
    payload.validate()?;

    let category = state
        .document_service
        .create_category(user.context(), kind, payload.name)
        .await?;

    Ok(Json(ApiResponse::ok(category)))
}
