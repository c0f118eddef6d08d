//! Users table access.

use sqlx::PgPool;
use uuid::Uuid;

use docsuite_core::error::AppError;
use docsuite_core::result::AppResult;
use docsuite_core::types::pagination::{PageRequest, PageResponse};
use docsuite_entity::user::model::{CreateUser, UpdateUser};
use docsuite_entity::user::{User, UserStatus};

use super::{db_error, db_error_unique};

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load user"))
    }

    /// Usernames are matched case-insensitively; the unique index is on
    /// LOWER(username).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load user by username"))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("load user by email"))
    }

    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("check user exists"))
    }

    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count users"))?;

        let rows =
            sqlx::query_as("SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2")
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("list users"))?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Substring match over username, display name and email.
    pub async fn search(&self, query: &str, page: &PageRequest) -> AppResult<PageResponse<User>> {
        const FILTER: &str = "username ILIKE $1 OR display_name ILIKE $1 OR email ILIKE $1";
        let pattern = format!("%{query}%");

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users WHERE {FILTER}"))
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("count user search"))?;

        let rows = sqlx::query_as(&format!(
            "SELECT * FROM users WHERE {FILTER} ORDER BY username LIMIT $2 OFFSET $3"
        ))
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("search users"))?;

        Ok(PageResponse::new(
            rows,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as(
            "INSERT INTO users (email, username, password_hash, display_name, created_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(&data.display_name)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some("users_email_key") => {
                AppError::conflict(format!("email '{}' is already registered", data.email))
            }
            sqlx::Error::Database(db) if db.constraint() == Some("users_username_key") => {
                AppError::conflict(format!("username '{}' is taken", data.username))
            }
            _ => db_error("create user")(e),
        })
    }

    pub async fn update(&self, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as(
            "UPDATE users SET \
                 email = COALESCE($2, email), \
                 display_name = COALESCE($3, display_name), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.email)
        .bind(&data.display_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error_unique(
            "update user",
            "users_email_key",
            "email already in use by another account".to_string(),
        ))?
        .ok_or_else(|| AppError::not_found(format!("user {} does not exist", data.id)))
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        let done = sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(db_error("update password"))?;

        match done.rows_affected() {
            0 => Err(AppError::not_found(format!("user {id} does not exist"))),
            _ => Ok(()),
        }
    }

    /// Status is the only removal mechanism; user rows are never deleted
    /// because grants and audit entries reference them.
    pub async fn update_status(&self, id: Uuid, status: UserStatus) -> AppResult<User> {
        sqlx::query_as("UPDATE users SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("update user status"))?
            .ok_or_else(|| AppError::not_found(format!("user {id} does not exist")))
    }

    pub async fn count(&self) -> AppResult<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count users"))?;
        Ok(n as u64)
    }
}
