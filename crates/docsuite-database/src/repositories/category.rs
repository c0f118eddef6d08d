//! Per-kind document categories.

use sqlx::PgPool;
use uuid::Uuid;

use docsuite_core::result::AppResult;
use docsuite_entity::document::DocumentKind;
use docsuite_entity::document::category::{CreateDocumentCategory, DocumentCategory};

use super::{db_error, db_error_unique};

#[derive(Debug, Clone)]
pub struct DocumentCategoryRepository {
    pool: PgPool,
}

impl DocumentCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DocumentCategory>> {
        sqlx::query_as("SELECT * FROM document_categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load category"))
    }

    /// Categories of one kind in display order.
    pub async fn find_by_kind(
        &self,
        kind: DocumentKind,
        include_archived: bool,
    ) -> AppResult<Vec<DocumentCategory>> {
        let sql = match include_archived {
            true => {
                "SELECT * FROM document_categories WHERE kind = $1 \
                 ORDER BY sort_order, name"
            }
            false => {
                "SELECT * FROM document_categories WHERE kind = $1 AND archived = FALSE \
                 ORDER BY sort_order, name"
            }
        };

        sqlx::query_as(sql)
            .bind(kind)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list categories"))
    }

    /// New categories land at the end of the kind's ordering.
    pub async fn create(&self, data: &CreateDocumentCategory) -> AppResult<DocumentCategory> {
        sqlx::query_as(
            "INSERT INTO document_categories (kind, name, sort_order) \
             VALUES ($1, $2, \
                 (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM document_categories WHERE kind = $1)) \
             RETURNING *",
        )
        .bind(data.kind)
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error_unique(
            "create category",
            "document_categories_kind_name_key",
            format!("category '{}' already exists", data.name),
        ))
    }
}
