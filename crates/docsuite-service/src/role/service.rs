//! Role registry management.

use std::sync::Arc;

use tracing::info;

use docsuite_auth::PermissionResolver;
use docsuite_core::error::AppError;
use docsuite_database::repositories::RoleRepository;
use docsuite_entity::role::model::{CreateRole, Role};

use crate::context::RequestContext;
use crate::systems;

/// Manages the role registry.
#[derive(Debug, Clone)]
pub struct RoleService {
    /// Role repository.
    roles: Arc<RoleRepository>,
    /// Permission resolver for access checks.
    resolver: Arc<PermissionResolver>,
}

impl RoleService {
    /// Creates a new role service.
    pub fn new(roles: Arc<RoleRepository>, resolver: Arc<PermissionResolver>) -> Self {
        Self { roles, resolver }
    }

    /// Lists all registered roles.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Role>, AppError> {
        self.resolver
            .require(ctx.user_id, systems::PERMISSIONS, systems::ROLE_READ)
            .await?;

        self.roles.find_all().await
    }

    /// Registers a new role.
    pub async fn create(&self, ctx: &RequestContext, data: CreateRole) -> Result<Role, AppError> {
        self.resolver
            .require(ctx.user_id, systems::PERMISSIONS, systems::ROLE_WRITE)
            .await?;

        if data.name.trim().is_empty() {
            return Err(AppError::validation("Role name cannot be empty"));
        }

        let role = self.roles.create(&data).await?;

        info!(actor_id = %ctx.user_id, role_id = %role.id, name = %role.name, "Role created");

        Ok(role)
    }
}
