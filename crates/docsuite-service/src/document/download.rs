//! Attachment downloads — resolves stored paths under the uploads root
//! and streams file content.
//!
//! Stored attachment paths begin with the owning kind's slug
//! (e.g. `policy/<uuid>/handbook.pdf`), which is how the download route
//! knows which permission system to check.

use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::info;

use docsuite_auth::PermissionResolver;
use docsuite_core::config::uploads::UploadsConfig;
use docsuite_core::error::AppError;
use docsuite_entity::document::DocumentKind;

use crate::context::RequestContext;
use crate::systems;

/// A resolved attachment ready to stream.
pub struct FileDownload {
    /// Streaming reader over the file content.
    pub stream: ReaderStream<fs::File>,
    /// File size in bytes.
    pub length: u64,
    /// Suggested filename for Content-Disposition.
    pub filename: String,
    /// MIME type for Content-Type.
    pub content_type: &'static str,
}

impl std::fmt::Debug for FileDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDownload")
            .field("length", &self.length)
            .field("filename", &self.filename)
            .finish()
    }
}

/// Streams document attachments with permission checking.
#[derive(Debug, Clone)]
pub struct DownloadService {
    /// Uploads root directory.
    root: PathBuf,
    /// Permission resolver for access checks.
    resolver: Arc<PermissionResolver>,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(config: &UploadsConfig, resolver: Arc<PermissionResolver>) -> Self {
        Self {
            root: PathBuf::from(&config.root),
            resolver,
        }
    }

    /// Downloads the attachment at `raw_path` (relative to the uploads
    /// root), checking read access for the owning kind.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        raw_path: &str,
    ) -> Result<FileDownload, AppError> {
        let relative = sanitize_path(raw_path)?;
        let kind = owning_kind(&relative)?;

        self.resolver
            .require(ctx.user_id, kind.system_id(), systems::ROLE_READ)
            .await?;

        let full_path = self.root.join(&relative);
        let metadata = fs::metadata(&full_path)
            .await
            .map_err(|_| AppError::not_found("Attachment not found"))?;
        if !metadata.is_file() {
            return Err(AppError::not_found("Attachment not found"));
        }

        let file = fs::File::open(&full_path)
            .await
            .map_err(|e| AppError::internal(format!("Failed to open attachment: {e}")))?;

        let filename = relative
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        let content_type = content_type_for(&filename);

        info!(user_id = %ctx.user_id, path = %relative.display(), "Attachment downloaded");

        Ok(FileDownload {
            stream: ReaderStream::new(file),
            length: metadata.len(),
            filename,
            content_type,
        })
    }
}

/// Rejects traversal and absolute components; returns the normalized
/// relative path.
fn sanitize_path(raw: &str) -> Result<PathBuf, AppError> {
    if raw.is_empty() || raw.contains('\\') || raw.contains('\0') {
        return Err(AppError::validation("Invalid attachment path"));
    }

    let path = Path::new(raw);
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            // "." is harmless but still rejected: stored paths are
            // always already normalized.
            _ => return Err(AppError::validation("Invalid attachment path")),
        }
    }

    if clean.components().count() < 2 {
        return Err(AppError::validation("Invalid attachment path"));
    }

    Ok(clean)
}

/// Extracts the owning kind from the path's leading component.
fn owning_kind(relative: &Path) -> Result<DocumentKind, AppError> {
    let first = relative
        .components()
        .next()
        .and_then(|c| c.as_os_str().to_str())
        .ok_or_else(|| AppError::validation("Invalid attachment path"))?;

    DocumentKind::from_str(first)
}

/// MIME type from the filename extension.
fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next().map(str::to_ascii_lowercase) {
        Some(ext) => match ext.as_str() {
            "pdf" => "application/pdf",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "txt" => "text/plain",
            "csv" => "text/csv",
            "doc" => "application/msword",
            "docx" => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            "xls" => "application/vnd.ms-excel",
            "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            _ => "application/octet-stream",
        },
        None => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normalized_relative_paths() {
        let clean = sanitize_path("policy/abc/handbook.pdf").unwrap();
        assert_eq!(clean, PathBuf::from("policy/abc/handbook.pdf"));
    }

    #[test]
    fn rejects_traversal_and_absolute_paths() {
        assert!(sanitize_path("../etc/passwd").is_err());
        assert!(sanitize_path("policy/../../etc/passwd").is_err());
        assert!(sanitize_path("/etc/passwd").is_err());
        assert!(sanitize_path("policy\\abc\\x.pdf").is_err());
        assert!(sanitize_path("").is_err());
    }

    #[test]
    fn rejects_bare_filenames() {
        // No kind component to authorize against.
        assert!(sanitize_path("handbook.pdf").is_err());
    }

    #[test]
    fn leading_component_selects_the_kind() {
        let kind = owning_kind(Path::new("risk_assessment/abc/x.pdf")).unwrap();
        assert_eq!(kind, DocumentKind::RiskAssessment);
        assert!(owning_kind(Path::new("minutes/abc/x.pdf")).is_err());
    }

    #[test]
    fn content_types_follow_extensions() {
        assert_eq!(content_type_for("a.pdf"), "application/pdf");
        assert_eq!(content_type_for("a.PNG"), "image/png");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }
}
