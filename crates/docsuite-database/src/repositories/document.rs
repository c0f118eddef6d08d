//! Documents and their version history.
//!
//! All queries are scoped by `kind` so one kind's routes can never read
//! or mutate another kind's records, even with a guessed id.

use sqlx::PgPool;
use uuid::Uuid;

use docsuite_core::error::AppError;
use docsuite_core::result::AppResult;
use docsuite_core::types::pagination::{PageRequest, PageResponse};
use docsuite_entity::document::model::{CreateDocument, Document, UpdateDocument};
use docsuite_entity::document::version::{CreateDocumentVersion, DocumentVersion};
use docsuite_entity::document::{DocumentAction, DocumentKind, ReorderDirection};

use super::db_error;

#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, kind: DocumentKind, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as("SELECT * FROM documents WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load document"))
    }

    /// List documents of one kind, optionally restricted to a category.
    /// Archived records are excluded unless `include_archived` is set.
    pub async fn find_all(
        &self,
        kind: DocumentKind,
        category_id: Option<Uuid>,
        include_archived: bool,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        let mut conditions = vec!["kind = $1".to_string()];
        let mut param_idx = 2u32;

        if category_id.is_some() {
            conditions.push(format!("category_id = ${param_idx}"));
            param_idx += 1;
        }
        if !include_archived {
            conditions.push("archived = FALSE".to_string());
        }

        let filter = format!("WHERE {}", conditions.join(" AND "));
        let count_sql = format!("SELECT COUNT(*) FROM documents {filter}");
        let page_sql = format!(
            "SELECT * FROM documents {filter} \
             ORDER BY sort_order, created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count = sqlx::query_scalar::<_, i64>(&count_sql).bind(kind);
        let mut rows = sqlx::query_as::<_, Document>(&page_sql).bind(kind);
        if let Some(cid) = category_id {
            count = count.bind(cid);
            rows = rows.bind(cid);
        }

        let total = count
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count documents"))?;

        let documents = rows
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list documents"))?;

        Ok(PageResponse::new(
            documents,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// New documents land at the end of their category's ordering.
    pub async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        sqlx::query_as(
            "INSERT INTO documents \
                 (kind, title, description, category_id, sort_order, attachment_path, review_date, created_by) \
             VALUES ($1, $2, $3, $4, \
                 (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM documents \
                  WHERE kind = $1 AND category_id IS NOT DISTINCT FROM $4), \
                 $5, $6, $7) \
             RETURNING *",
        )
        .bind(data.kind)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.category_id)
        .bind(&data.attachment_path)
        .bind(data.review_date)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create document"))
    }

    pub async fn update(&self, kind: DocumentKind, data: &UpdateDocument) -> AppResult<Document> {
        sqlx::query_as(
            "UPDATE documents SET \
                 title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 category_id = COALESCE($5, category_id), \
                 attachment_path = COALESCE($6, attachment_path), \
                 review_date = COALESCE($7, review_date), \
                 updated_at = NOW() \
             WHERE id = $1 AND kind = $2 RETURNING *",
        )
        .bind(data.id)
        .bind(kind)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.category_id)
        .bind(&data.attachment_path)
        .bind(data.review_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("update document"))?
        .ok_or_else(|| AppError::not_found(format!("document {} does not exist", data.id)))
    }

    /// Apply a flag action to a single document.
    pub async fn set_flag(
        &self,
        kind: DocumentKind,
        id: Uuid,
        action: DocumentAction,
    ) -> AppResult<Document> {
        // Column name comes from a closed enum, never from input.
        let sql = format!(
            "UPDATE documents SET {} = $3, updated_at = NOW() \
             WHERE id = $1 AND kind = $2 RETURNING *",
            action.column()
        );

        sqlx::query_as(&sql)
            .bind(id)
            .bind(kind)
            .bind(action.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("update document flag"))?
            .ok_or_else(|| AppError::not_found(format!("document {id} does not exist")))
    }

    /// Same flag action across many ids. Returns the number of rows
    /// actually updated.
    pub async fn bulk_set_flag(
        &self,
        kind: DocumentKind,
        ids: &[Uuid],
        action: DocumentAction,
    ) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "UPDATE documents SET {} = $3, updated_at = NOW() \
             WHERE id = ANY($1) AND kind = $2",
            action.column()
        );

        let done = sqlx::query(&sql)
            .bind(ids)
            .bind(kind)
            .bind(action.value())
            .execute(&self.pool)
            .await
            .map_err(db_error("bulk update documents"))?;

        Ok(done.rows_affected())
    }

    /// Invert the highlighted flag in a single statement, so two
    /// concurrent toggles land on opposite final states instead of
    /// colliding on a stale read.
    pub async fn toggle_highlight(&self, kind: DocumentKind, id: Uuid) -> AppResult<Document> {
        sqlx::query_as(
            "UPDATE documents SET highlighted = NOT highlighted, updated_at = NOW() \
             WHERE id = $1 AND kind = $2 RETURNING *",
        )
        .bind(id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("toggle highlight"))?
        .ok_or_else(|| AppError::not_found(format!("document {id} does not exist")))
    }

    /// Swap sort orders with the adjacent sibling in the given direction.
    ///
    /// Both rows are locked and updated inside one transaction so the
    /// swap touches exactly the two siblings. A document already at the
    /// edge of its category is returned unchanged.
    pub async fn reorder(
        &self,
        kind: DocumentKind,
        id: Uuid,
        direction: ReorderDirection,
    ) -> AppResult<Document> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin reorder"))?;

        let current: Document =
            sqlx::query_as("SELECT * FROM documents WHERE id = $1 AND kind = $2 FOR UPDATE")
                .bind(id)
                .bind(kind)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("lock document"))?
                .ok_or_else(|| AppError::not_found(format!("document {id} does not exist")))?;

        let neighbor_sql = match direction {
            ReorderDirection::Up => {
                "SELECT * FROM documents \
                 WHERE kind = $1 AND category_id IS NOT DISTINCT FROM $2 AND sort_order < $3 \
                 ORDER BY sort_order DESC LIMIT 1 FOR UPDATE"
            }
            ReorderDirection::Down => {
                "SELECT * FROM documents \
                 WHERE kind = $1 AND category_id IS NOT DISTINCT FROM $2 AND sort_order > $3 \
                 ORDER BY sort_order ASC LIMIT 1 FOR UPDATE"
            }
        };

        let neighbor: Option<Document> = sqlx::query_as(neighbor_sql)
            .bind(kind)
            .bind(current.category_id)
            .bind(current.sort_order)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("find reorder neighbor"))?;

        let Some(neighbor) = neighbor else {
            // Already first/last within the category.
            tx.rollback().await.map_err(db_error("roll back reorder"))?;
            return Ok(current);
        };

        for (row_id, new_order) in [
            (current.id, neighbor.sort_order),
            (neighbor.id, current.sort_order),
        ] {
            sqlx::query("UPDATE documents SET sort_order = $2, updated_at = NOW() WHERE id = $1")
                .bind(row_id)
                .bind(new_order)
                .execute(&mut *tx)
                .await
                .map_err(db_error("swap sort order"))?;
        }

        tx.commit().await.map_err(db_error("commit reorder"))?;

        Ok(Document {
            sort_order: neighbor.sort_order,
            ..current
        })
    }

    /// Permanent removal. Returns `false` if the row didn't exist.
    pub async fn hard_delete(&self, kind: DocumentKind, id: Uuid) -> AppResult<bool> {
        let done = sqlx::query("DELETE FROM documents WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete document"))?;
        Ok(done.rows_affected() > 0)
    }

    pub async fn find_versions(&self, document_id: Uuid) -> AppResult<Vec<DocumentVersion>> {
        sqlx::query_as(
            "SELECT * FROM document_versions WHERE document_id = $1 ORDER BY version DESC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list versions"))
    }

    /// Bump the document's version counter and snapshot the revision in
    /// `document_versions` inside one transaction.
    pub async fn create_version(
        &self,
        kind: DocumentKind,
        data: &CreateDocumentVersion,
    ) -> AppResult<DocumentVersion> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin version"))?;

        let bumped: Document = sqlx::query_as(
            "UPDATE documents SET \
                 version = version + 1, \
                 attachment_path = COALESCE($3, attachment_path), \
                 updated_at = NOW() \
             WHERE id = $1 AND kind = $2 RETURNING *",
        )
        .bind(data.document_id)
        .bind(kind)
        .bind(&data.attachment_path)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("bump version"))?
        .ok_or_else(|| {
            AppError::not_found(format!("document {} does not exist", data.document_id))
        })?;

        let version = sqlx::query_as(
            "INSERT INTO document_versions (document_id, version, notes, attachment_path, created_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.document_id)
        .bind(bumped.version)
        .bind(&data.notes)
        .bind(&data.attachment_path)
        .bind(data.created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("record version"))?;

        tx.commit().await.map_err(db_error("commit version"))?;
        Ok(version)
    }
}
