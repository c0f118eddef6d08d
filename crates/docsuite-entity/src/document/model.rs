//! Document entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::DocumentKind;

/// A versioned, categorized, approvable compliance document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// The document kind.
    pub kind: DocumentKind,
    /// Document title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Owning category, if categorized.
    pub category_id: Option<Uuid>,
    /// Display position within the category.
    pub sort_order: i32,
    /// Current version number, starting at 1.
    pub version: i32,
    /// Whether the current version has been approved.
    pub approved: bool,
    /// Whether the document is pinned/highlighted in listings.
    pub highlighted: bool,
    /// Whether the document is archived. Archived documents are hidden
    /// from default listings but never lose their history.
    pub archived: bool,
    /// Stored attachment path relative to the uploads root.
    pub attachment_path: Option<String>,
    /// Next scheduled review date.
    pub review_date: Option<NaiveDate>,
    /// The user who created the document.
    pub created_by: Option<Uuid>,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// The document kind.
    pub kind: DocumentKind,
    /// Document title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Owning category.
    pub category_id: Option<Uuid>,
    /// Stored attachment path.
    pub attachment_path: Option<String>,
    /// Next scheduled review date.
    pub review_date: Option<NaiveDate>,
    /// The creating user.
    pub created_by: Option<Uuid>,
}

/// Data for updating an existing document's metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDocument {
    /// The document ID to update.
    pub id: Uuid,
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category_id: Option<Uuid>,
    /// New attachment path.
    pub attachment_path: Option<String>,
    /// New review date.
    pub review_date: Option<NaiveDate>,
}
