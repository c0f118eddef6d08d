//! Group creation and membership changes.
//!
//! Membership edges feed the permission resolver, so every change here
//! invalidates the affected users' cached decisions.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docsuite_auth::PermissionResolver;
use docsuite_core::error::AppError;
use docsuite_core::types::pagination::{PageRequest, PageResponse};
use docsuite_database::repositories::{
    GroupRepository, PermissionAuditRepository, UserRepository,
};
use docsuite_entity::audit::AuditAction;
use docsuite_entity::audit::model::CreatePermissionAudit;
use docsuite_entity::group::model::{CreateGroup, Group};
use docsuite_entity::user::User;

use crate::context::RequestContext;
use crate::systems;

/// Manages groups and their memberships.
#[derive(Debug, Clone)]
pub struct GroupService {
    /// Group repository.
    groups: Arc<GroupRepository>,
    /// User repository (existence checks).
    users: Arc<UserRepository>,
    /// Audit log repository.
    audit: Arc<PermissionAuditRepository>,
    /// Permission resolver for access checks and invalidation.
    resolver: Arc<PermissionResolver>,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(
        groups: Arc<GroupRepository>,
        users: Arc<UserRepository>,
        audit: Arc<PermissionAuditRepository>,
        resolver: Arc<PermissionResolver>,
    ) -> Self {
        Self {
            groups,
            users,
            audit,
            resolver,
        }
    }

    /// Lists all groups.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Group>, AppError> {
        self.resolver
            .require(ctx.user_id, systems::GROUPS, systems::ROLE_READ)
            .await?;

        self.groups.find_all(page).await
    }

    /// Gets a single group.
    pub async fn get(&self, ctx: &RequestContext, group_id: Uuid) -> Result<Group, AppError> {
        self.resolver
            .require(ctx.user_id, systems::GROUPS, systems::ROLE_READ)
            .await?;

        self.groups
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Group {group_id} not found")))
    }

    /// Lists the members of a group.
    pub async fn members(&self, ctx: &RequestContext, group_id: Uuid) -> Result<Vec<User>, AppError> {
        self.resolver
            .require(ctx.user_id, systems::GROUPS, systems::ROLE_READ)
            .await?;

        if self.groups.find_by_id(group_id).await?.is_none() {
            return Err(AppError::not_found(format!("Group {group_id} not found")));
        }

        self.groups.find_members(group_id).await
    }

    /// Creates a group together with its initial members.
    ///
    /// The group row and every membership edge land in one transaction;
    /// an unknown member id rolls the whole creation back.
    pub async fn create(&self, ctx: &RequestContext, data: CreateGroup) -> Result<Group, AppError> {
        self.resolver
            .require(ctx.user_id, systems::GROUPS, systems::ROLE_WRITE)
            .await?;

        if data.name.trim().is_empty() {
            return Err(AppError::validation("Group name cannot be empty"));
        }

        let initial_members = data.initial_user_ids.clone();
        let group = self.groups.create_with_members(&data, ctx.user_id).await?;

        self.record(
            ctx,
            AuditAction::GroupCreated,
            None,
            group.id,
            serde_json::json!({ "name": group.name, "initial_members": initial_members }),
        )
        .await;

        // New members may already inherit cached denials.
        for user_id in &initial_members {
            self.resolver.invalidate_user(*user_id).await?;
        }

        info!(actor_id = %ctx.user_id, group_id = %group.id, name = %group.name, "Group created");

        Ok(group)
    }

    /// Adds a user to a group.
    pub async fn add_member(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        self.resolver
            .require(ctx.user_id, systems::GROUPS, systems::ROLE_WRITE)
            .await?;

        if !self.users.exists(user_id).await? {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }

        self.groups.add_member(group_id, user_id, ctx.user_id).await?;

        self.record(
            ctx,
            AuditAction::AddUserToGroup,
            Some(user_id),
            group_id,
            serde_json::Value::Null,
        )
        .await;
        self.resolver.invalidate_user(user_id).await?;

        info!(actor_id = %ctx.user_id, group_id = %group_id, user_id = %user_id, "Member added");

        Ok(())
    }

    /// Removes a user from a group.
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        self.resolver
            .require(ctx.user_id, systems::GROUPS, systems::ROLE_WRITE)
            .await?;

        let removed = self.groups.remove_member(group_id, user_id).await?;
        if !removed {
            return Err(AppError::not_found(
                "User is not a member of this group",
            ));
        }

        self.record(
            ctx,
            AuditAction::RemoveUserFromGroup,
            Some(user_id),
            group_id,
            serde_json::Value::Null,
        )
        .await;
        self.resolver.invalidate_user(user_id).await?;

        info!(actor_id = %ctx.user_id, group_id = %group_id, user_id = %user_id, "Member removed");

        Ok(())
    }

    /// Appends an audit entry; failures are logged, not propagated.
    async fn record(
        &self,
        ctx: &RequestContext,
        action: AuditAction,
        user_id: Option<Uuid>,
        group_id: Uuid,
        details: serde_json::Value,
    ) {
        let entry = CreatePermissionAudit {
            action: action.as_str().to_string(),
            user_id,
            group_id: Some(group_id),
            system_id: None,
            role_id: None,
            actor_id: ctx.user_id,
            details: (!details.is_null()).then_some(details),
        };
        if let Err(e) = self.audit.create(&entry).await {
            tracing::warn!(action = %action, error = %e, "Failed to write audit entry");
        }
    }
}
