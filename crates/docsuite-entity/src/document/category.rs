//! Document category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::DocumentKind;

/// A named category grouping documents of one kind.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentCategory {
    /// Unique category identifier.
    pub id: Uuid,
    /// The document kind this category belongs to.
    pub kind: DocumentKind,
    /// Category name, unique within the kind.
    pub name: String,
    /// Display position among the kind's categories.
    pub sort_order: i32,
    /// Whether the category is archived.
    pub archived: bool,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocumentCategory {
    /// The document kind.
    pub kind: DocumentKind,
    /// Category name.
    pub name: String,
}
