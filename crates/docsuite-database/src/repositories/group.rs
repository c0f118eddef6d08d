//! Groups and the user_groups membership edge.

use sqlx::PgPool;
use uuid::Uuid;

use docsuite_core::error::AppError;
use docsuite_core::result::AppResult;
use docsuite_core::types::pagination::{PageRequest, PageResponse};
use docsuite_entity::group::model::{CreateGroup, Group, UserGroup};
use docsuite_entity::user::User;

use super::db_error;

#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Group>> {
        sqlx::query_as("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load group"))
    }

    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Group>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM groups")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count groups"))?;

        let rows = sqlx::query_as("SELECT * FROM groups ORDER BY name LIMIT $1 OFFSET $2")
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list groups"))?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert the group row and every initial membership edge in one
    /// transaction. A duplicate name or unknown member id rolls the
    /// whole creation back.
    pub async fn create_with_members(
        &self,
        data: &CreateGroup,
        added_by: Uuid,
    ) -> AppResult<Group> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin group creation"))?;

        let group: Group =
            sqlx::query_as("INSERT INTO groups (name, description) VALUES ($1, $2) RETURNING *")
                .bind(&data.name)
                .bind(&data.description)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| match &e {
                    sqlx::Error::Database(db) if db.constraint() == Some("groups_name_key") => {
                        AppError::conflict(format!("group '{}' already exists", data.name))
                    }
                    _ => db_error("create group")(e),
                })?;

        for user_id in &data.initial_user_ids {
            sqlx::query("INSERT INTO user_groups (user_id, group_id, added_by) VALUES ($1, $2, $3)")
                .bind(user_id)
                .bind(group.id)
                .bind(added_by)
                .execute(&mut *tx)
                .await
                .map_err(|e| match &e {
                    sqlx::Error::Database(db)
                        if db.constraint() == Some("user_groups_user_id_fkey") =>
                    {
                        AppError::not_found(format!("user {user_id} does not exist"))
                    }
                    _ => db_error("add initial member")(e),
                })?;
        }

        tx.commit().await.map_err(db_error("commit group creation"))?;
        Ok(group)
    }

    pub async fn add_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        added_by: Uuid,
    ) -> AppResult<UserGroup> {
        sqlx::query_as(
            "INSERT INTO user_groups (user_id, group_id, added_by) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(group_id)
        .bind(added_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("user_groups_pkey") => {
                AppError::conflict("user is already a member of this group")
            }
            sqlx::Error::Database(db) if db.constraint() == Some("user_groups_user_id_fkey") => {
                AppError::not_found(format!("user {user_id} does not exist"))
            }
            sqlx::Error::Database(db) if db.constraint() == Some("user_groups_group_id_fkey") => {
                AppError::not_found(format!("group {group_id} does not exist"))
            }
            _ => db_error("add member")(e),
        })
    }

    /// Returns `false` when no membership edge existed.
    pub async fn remove_member(&self, group_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let done = sqlx::query("DELETE FROM user_groups WHERE user_id = $1 AND group_id = $2")
            .bind(user_id)
            .bind(group_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("remove member"))?;
        Ok(done.rows_affected() > 0)
    }

    pub async fn find_members(&self, group_id: Uuid) -> AppResult<Vec<User>> {
        sqlx::query_as(
            "SELECT u.* FROM users u \
             JOIN user_groups ug ON ug.user_id = u.id \
             WHERE ug.group_id = $1 ORDER BY u.username",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list group members"))
    }

    pub async fn find_groups_for_user(&self, user_id: Uuid) -> AppResult<Vec<Group>> {
        sqlx::query_as(
            "SELECT g.* FROM groups g \
             JOIN user_groups ug ON ug.group_id = g.id \
             WHERE ug.user_id = $1 ORDER BY g.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list user groups"))
    }
}
