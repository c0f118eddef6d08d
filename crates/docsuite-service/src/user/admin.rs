//! Account administration, guarded by the `users` permission system.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docsuite_auth::PermissionResolver;
use docsuite_auth::password::PasswordHasher;
use docsuite_core::error::AppError;
use docsuite_core::types::pagination::{PageRequest, PageResponse};
use docsuite_database::repositories::UserRepository;
use docsuite_entity::user::model::{CreateUser, UpdateUser};
use docsuite_entity::user::{User, UserStatus};

use crate::context::RequestContext;
use crate::systems;
use crate::user::service::{validate_email, validate_password};

#[derive(Debug, Clone)]
pub struct AdminUserService {
    users: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    resolver: Arc<PermissionResolver>,
    password_min_length: usize,
}

/// Provisioning payload for an admin-created account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AdminCreateUserRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
}

impl AdminUserService {
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        resolver: Arc<PermissionResolver>,
        password_min_length: usize,
    ) -> Self {
        Self {
            users,
            hasher,
            resolver,
            password_min_length,
        }
    }

    /// Pages through accounts, narrowed by a free-text search when one
    /// is given.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.resolver
            .require(ctx.user_id, systems::USERS, systems::ROLE_READ)
            .await?;

        match search.map(str::trim) {
            Some(term) if !term.is_empty() => self.users.search(term, page).await,
            _ => self.users.find_all(page).await,
        }
    }

    pub async fn get(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        self.resolver
            .require(ctx.user_id, systems::USERS, systems::ROLE_READ)
            .await?;

        let user = self.users.find_by_id(user_id).await?;
        user.ok_or_else(|| AppError::not_found(format!("user {user_id} does not exist")))
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: AdminCreateUserRequest,
    ) -> Result<User, AppError> {
        self.resolver
            .require(ctx.user_id, systems::USERS, systems::ROLE_WRITE)
            .await?;

        validate_email(&req.email)?;
        if req.username.trim().is_empty() {
            return Err(AppError::validation("username must not be blank"));
        }
        validate_password(&req.password, self.password_min_length)?;

        let record = CreateUser {
            email: req.email,
            username: req.username,
            password_hash: self.hasher.hash_password(&req.password)?,
            display_name: req.display_name,
            created_by: Some(ctx.user_id),
        };
        let user = self.users.create(&record).await?;

        info!(actor_id = %ctx.user_id, user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        email: Option<String>,
        display_name: Option<String>,
    ) -> Result<User, AppError> {
        self.resolver
            .require(ctx.user_id, systems::USERS, systems::ROLE_WRITE)
            .await?;

        if let Some(email) = &email {
            validate_email(email)?;
        }

        let changes = UpdateUser {
            id: user_id,
            email,
            display_name,
        };
        let user = self.users.update(&changes).await?;

        info!(actor_id = %ctx.user_id, user_id = %user_id, "user updated");
        Ok(user)
    }

    /// Flips an account's status. Deactivation also drops the user's
    /// cached access decisions so outstanding tokens stop passing
    /// permission checks promptly.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<User, AppError> {
        self.resolver
            .require(ctx.user_id, systems::USERS, systems::ROLE_WRITE)
            .await?;

        if user_id == ctx.user_id && status == UserStatus::Inactive {
            return Err(AppError::validation(
                "you cannot deactivate your own account",
            ));
        }

        let user = self.users.update_status(user_id, status).await?;
        if status == UserStatus::Inactive {
            self.resolver.invalidate_user(user_id).await?;
        }

        info!(actor_id = %ctx.user_id, user_id = %user_id, status = %user.status, "user status changed");
        Ok(user)
    }

    /// Accounts are never hard-deleted; the audit log and document
    /// history keep referring to them, so delete means deactivate.
    pub async fn deactivate(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        self.set_status(ctx, user_id, UserStatus::Inactive).await
    }
}
