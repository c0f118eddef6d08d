//! Attachment download handler.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::Response;

use docsuite_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `GET /api/documents/download/{*path}`
///
/// Streams the attachment. Access is checked against the kind that owns
/// the path's first segment.
pub async fn download(
    State(state): State<AppState>,
    user: AuthUser,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let file = state.download_service.download(user.context(), &path).await?;

    let disposition = format!("attachment; filename=\"{}\"", file.filename);

    let response = Response::builder()
        .header(header::CONTENT_TYPE, file.content_type)
        .header(header::CONTENT_LENGTH, file.length)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from_stream(file.stream))
        .map_err(|e| AppError::with_source(
            docsuite_core::error::ErrorKind::Internal,
            "Failed to build download response",
            e,
        ))?;

    Ok(response)
}
