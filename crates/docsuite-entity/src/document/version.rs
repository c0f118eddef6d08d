//! Document version entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable snapshot of one revision of a document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentVersion {
    /// Unique version row identifier.
    pub id: Uuid,
    /// The document this version belongs to.
    pub document_id: Uuid,
    /// Version number, unique per document.
    pub version: i32,
    /// Revision notes.
    pub notes: Option<String>,
    /// Attachment path captured at this revision.
    pub attachment_path: Option<String>,
    /// The user who created this revision.
    pub created_by: Option<Uuid>,
    /// When the revision was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a new document version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocumentVersion {
    /// The document being revised.
    pub document_id: Uuid,
    /// Revision notes.
    pub notes: Option<String>,
    /// Attachment path for this revision.
    pub attachment_path: Option<String>,
    /// The revising user.
    pub created_by: Option<Uuid>,
}
