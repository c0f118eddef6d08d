//! Append-only permission audit log. Rows are inserted and read, never
//! updated or deleted; there is no delete method on purpose.

use sqlx::PgPool;
use uuid::Uuid;

use docsuite_core::result::AppResult;
use docsuite_core::types::pagination::{PageRequest, PageResponse};
use docsuite_entity::audit::model::{CreatePermissionAudit, PermissionAudit};

use super::db_error;

#[derive(Debug, Clone)]
pub struct PermissionAuditRepository {
    pool: PgPool,
}

impl PermissionAuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: &CreatePermissionAudit) -> AppResult<PermissionAudit> {
        sqlx::query_as(
            "INSERT INTO permission_audit \
                 (action, user_id, group_id, system_id, role_id, actor_id, details) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.action)
        .bind(data.user_id)
        .bind(data.group_id)
        .bind(&data.system_id)
        .bind(data.role_id)
        .bind(data.actor_id)
        .bind(&data.details)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("append audit entry"))
    }

    /// Filtered, newest-first page over the log. Each filter is optional;
    /// the WHERE clause and bind list are built together so the
    /// placeholder numbers stay in step.
    pub async fn search(
        &self,
        actor_id: Option<Uuid>,
        action: Option<&str>,
        user_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<PermissionAudit>> {
        let mut clauses: Vec<String> = Vec::new();
        if actor_id.is_some() {
            clauses.push(format!("actor_id = ${}", clauses.len() + 1));
        }
        if action.is_some() {
            clauses.push(format!("action = ${}", clauses.len() + 1));
        }
        if user_id.is_some() {
            clauses.push(format!("user_id = ${}", clauses.len() + 1));
        }

        let filter = match clauses.is_empty() {
            true => String::new(),
            false => format!("WHERE {}", clauses.join(" AND ")),
        };
        let next = clauses.len() + 1;

        let count_sql = format!("SELECT COUNT(*) FROM permission_audit {filter}");
        let page_sql = format!(
            "SELECT * FROM permission_audit {filter} \
             ORDER BY created_at DESC LIMIT ${next} OFFSET ${}",
            next + 1
        );

        let mut count = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut rows = sqlx::query_as::<_, PermissionAudit>(&page_sql);
        if let Some(id) = actor_id {
            count = count.bind(id);
            rows = rows.bind(id);
        }
        if let Some(tag) = action {
            count = count.bind(tag.to_string());
            rows = rows.bind(tag.to_string());
        }
        if let Some(id) = user_id {
            count = count.bind(id);
            rows = rows.bind(id);
        }

        let total = count
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count audit entries"))?;

        let entries = rows
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("search audit log"))?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
