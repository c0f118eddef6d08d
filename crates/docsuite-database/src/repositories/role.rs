//! Role registry access. Roles are created by administrators and only
//! ever referenced by grants, so there is no update or delete here.

use sqlx::PgPool;
use uuid::Uuid;

use docsuite_core::result::AppResult;
use docsuite_entity::role::model::{CreateRole, Role};

use super::{db_error, db_error_unique};

#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        sqlx::query_as("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load role"))
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        sqlx::query_as("SELECT * FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load role by name"))
    }

    pub async fn find_all(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as("SELECT * FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list roles"))
    }

    pub async fn create(&self, data: &CreateRole) -> AppResult<Role> {
        sqlx::query_as(
            "INSERT INTO roles (name, system_id, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.system_id)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error_unique(
            "create role",
            "roles_name_key",
            format!("role '{}' already exists", data.name),
        ))
    }
}
