//! Permission store: direct and group grant triples.
//!
//! Every read that feeds an access decision filters lapsed grants with
//! `(expiry IS NULL OR expiry > NOW())`. Expired rows stay in the table
//! until explicitly revoked.

use sqlx::PgPool;
use uuid::Uuid;

use docsuite_core::result::AppResult;
use docsuite_entity::permission::model::{
    CreateGroupPermission, CreatePermission, GroupPermission, Permission,
};

use super::{db_error, db_error_unique};

#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>> {
        sqlx::query_as("SELECT * FROM permissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load permission"))
    }

    /// Every direct grant for a user, lapsed ones included. Admin
    /// listing view; access decisions go through
    /// [`active_role_names_for_user`](Self::active_role_names_for_user).
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Permission>> {
        sqlx::query_as("SELECT * FROM permissions WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list user permissions"))
    }

    /// The (user, system, role) triple is unique; a duplicate grant is a
    /// conflict, not an upsert.
    pub async fn create(&self, data: &CreatePermission) -> AppResult<Permission> {
        sqlx::query_as(
            "INSERT INTO permissions (user_id, system_id, role_id, expiry, granted_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.system_id)
        .bind(data.role_id)
        .bind(data.expiry)
        .bind(data.granted_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error_unique(
            "grant permission",
            "permissions_user_system_role_key",
            "permission already granted for this user, system and role".to_string(),
        ))
    }

    /// Revoke by id, returning the removed row so the caller can audit it.
    pub async fn delete(&self, id: Uuid) -> AppResult<Option<Permission>> {
        sqlx::query_as("DELETE FROM permissions WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("revoke permission"))
    }

    pub async fn find_group_permission_by_id(&self, id: Uuid) -> AppResult<Option<GroupPermission>> {
        sqlx::query_as("SELECT * FROM group_permissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load group permission"))
    }

    pub async fn find_by_group(&self, group_id: Uuid) -> AppResult<Vec<GroupPermission>> {
        sqlx::query_as(
            "SELECT * FROM group_permissions WHERE group_id = $1 ORDER BY created_at DESC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list group permissions"))
    }

    pub async fn create_group_permission(
        &self,
        data: &CreateGroupPermission,
    ) -> AppResult<GroupPermission> {
        sqlx::query_as(
            "INSERT INTO group_permissions (group_id, system_id, role_id, expiry, granted_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.group_id)
        .bind(&data.system_id)
        .bind(data.role_id)
        .bind(data.expiry)
        .bind(data.granted_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error_unique(
            "grant group permission",
            "group_permissions_group_system_role_key",
            "permission already granted for this group, system and role".to_string(),
        ))
    }

    pub async fn delete_group_permission(&self, id: Uuid) -> AppResult<Option<GroupPermission>> {
        sqlx::query_as("DELETE FROM group_permissions WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("revoke group permission"))
    }

    /// Role names from the user's active direct grants in one system.
    /// A grant on the `*` system applies everywhere.
    pub async fn active_role_names_for_user(
        &self,
        user_id: Uuid,
        system_id: &str,
    ) -> AppResult<Vec<String>> {
        sqlx::query_scalar(
            "SELECT r.name FROM permissions p \
             JOIN roles r ON r.id = p.role_id \
             WHERE p.user_id = $1 \
               AND (p.system_id = $2 OR p.system_id = '*') \
               AND (p.expiry IS NULL OR p.expiry > NOW())",
        )
        .bind(user_id)
        .bind(system_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load direct role names"))
    }

    /// Role names the user inherits through group membership, same
    /// system and expiry filters as the direct query.
    pub async fn active_group_role_names_for_user(
        &self,
        user_id: Uuid,
        system_id: &str,
    ) -> AppResult<Vec<String>> {
        sqlx::query_scalar(
            "SELECT r.name FROM group_permissions gp \
             JOIN user_groups ug ON ug.group_id = gp.group_id \
             JOIN roles r ON r.id = gp.role_id \
             WHERE ug.user_id = $1 \
               AND (gp.system_id = $2 OR gp.system_id = '*') \
               AND (gp.expiry IS NULL OR gp.expiry > NOW())",
        )
        .bind(user_id)
        .bind(system_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load group role names"))
    }

    /// Member ids of a group, used to invalidate cached access decisions
    /// after a group-level change.
    pub async fn member_ids_of_group(&self, group_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar("SELECT user_id FROM user_groups WHERE group_id = $1")
            .bind(group_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list group member ids"))
    }
}
