//! Grant and revoke permissions for users and groups.
//!
//! Every mutation appends an audit entry and invalidates the affected
//! cached access decisions before returning.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use docsuite_auth::{Access, PermissionResolver};
use docsuite_core::error::AppError;
use docsuite_database::repositories::{
    GroupRepository, PermissionAuditRepository, PermissionRepository, RoleRepository,
    UserRepository,
};
use docsuite_entity::audit::AuditAction;
use docsuite_entity::audit::model::CreatePermissionAudit;
use docsuite_entity::permission::model::{
    CreateGroupPermission, CreatePermission, GroupPermission, Permission,
};

use crate::context::RequestContext;
use crate::systems;

/// Request to grant a permission to a user or group.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GrantPermissionRequest {
    /// The system to grant access in (`*` for all systems).
    pub system_id: String,
    /// The role to grant.
    pub role_id: Uuid,
    /// Optional expiry as an RFC 3339 timestamp.
    pub expiry: Option<String>,
}

/// Manages permission grants on users and groups.
#[derive(Debug, Clone)]
pub struct PermissionService {
    /// Permission repository.
    permissions: Arc<PermissionRepository>,
    /// User repository (existence checks).
    users: Arc<UserRepository>,
    /// Role repository (existence checks).
    roles: Arc<RoleRepository>,
    /// Group repository (existence checks).
    groups: Arc<GroupRepository>,
    /// Audit log repository.
    audit: Arc<PermissionAuditRepository>,
    /// Permission resolver for access checks and invalidation.
    resolver: Arc<PermissionResolver>,
}

impl PermissionService {
    /// Creates a new permission service.
    pub fn new(
        permissions: Arc<PermissionRepository>,
        users: Arc<UserRepository>,
        roles: Arc<RoleRepository>,
        groups: Arc<GroupRepository>,
        audit: Arc<PermissionAuditRepository>,
        resolver: Arc<PermissionResolver>,
    ) -> Self {
        Self {
            permissions,
            users,
            roles,
            groups,
            audit,
            resolver,
        }
    }

    /// Lists a user's direct permissions, including lapsed ones.
    pub async fn list_for_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<Vec<Permission>, AppError> {
        self.resolver
            .require(ctx.user_id, systems::PERMISSIONS, systems::ROLE_READ)
            .await?;

        if !self.users.exists(user_id).await? {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }

        self.permissions.find_by_user(user_id).await
    }

    /// Lists a group's permissions, including lapsed ones.
    pub async fn list_for_group(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
    ) -> Result<Vec<GroupPermission>, AppError> {
        self.resolver
            .require(ctx.user_id, systems::PERMISSIONS, systems::ROLE_READ)
            .await?;

        if self.groups.find_by_id(group_id).await?.is_none() {
            return Err(AppError::not_found(format!("Group {group_id} not found")));
        }

        self.permissions.find_by_group(group_id).await
    }

    /// Grants a direct permission to a user.
    pub async fn grant_to_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        req: GrantPermissionRequest,
    ) -> Result<Permission, AppError> {
        self.resolver
            .require(ctx.user_id, systems::PERMISSIONS, systems::ROLE_WRITE)
            .await?;

        if !self.users.exists(user_id).await? {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        let role = self
            .roles
            .find_by_id(req.role_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Role {} not found", req.role_id)))?;
        let expiry = parse_expiry(req.expiry.as_deref())?;

        let permission = self
            .permissions
            .create(&CreatePermission {
                user_id,
                system_id: req.system_id.clone(),
                role_id: role.id,
                expiry,
                granted_by: Some(ctx.user_id),
            })
            .await?;

        self.record(
            ctx,
            AuditAction::Granted,
            Some(user_id),
            None,
            Some(req.system_id),
            Some(role.id),
            serde_json::json!({ "role": role.name, "expiry": expiry }),
        )
        .await;
        self.resolver.invalidate_user(user_id).await?;

        info!(actor_id = %ctx.user_id, user_id = %user_id, role = %role.name, "Permission granted");

        Ok(permission)
    }

    /// Revokes a direct user permission. The permission must belong to
    /// the named user.
    pub async fn revoke_from_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        permission_id: Uuid,
    ) -> Result<Permission, AppError> {
        self.resolver
            .require(ctx.user_id, systems::PERMISSIONS, systems::ROLE_WRITE)
            .await?;

        let existing = self.permissions.find_by_id(permission_id).await?;
        if !existing.is_some_and(|p| p.user_id == user_id) {
            return Err(AppError::not_found(format!(
                "Permission {permission_id} not found"
            )));
        }

        let revoked = self
            .permissions
            .delete(permission_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Permission {permission_id} not found"))
            })?;

        self.record(
            ctx,
            AuditAction::Revoked,
            Some(revoked.user_id),
            None,
            Some(revoked.system_id.clone()),
            Some(revoked.role_id),
            serde_json::json!({ "permission_id": permission_id }),
        )
        .await;
        self.resolver.invalidate_user(revoked.user_id).await?;

        info!(actor_id = %ctx.user_id, user_id = %revoked.user_id, "Permission revoked");

        Ok(revoked)
    }

    /// Grants a permission to a group.
    pub async fn grant_to_group(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        req: GrantPermissionRequest,
    ) -> Result<GroupPermission, AppError> {
        self.resolver
            .require(ctx.user_id, systems::PERMISSIONS, systems::ROLE_WRITE)
            .await?;

        if self.groups.find_by_id(group_id).await?.is_none() {
            return Err(AppError::not_found(format!("Group {group_id} not found")));
        }
        let role = self
            .roles
            .find_by_id(req.role_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Role {} not found", req.role_id)))?;
        let expiry = parse_expiry(req.expiry.as_deref())?;

        let permission = self
            .permissions
            .create_group_permission(&CreateGroupPermission {
                group_id,
                system_id: req.system_id.clone(),
                role_id: role.id,
                expiry,
                granted_by: Some(ctx.user_id),
            })
            .await?;

        self.record(
            ctx,
            AuditAction::GroupPermissionGranted,
            None,
            Some(group_id),
            Some(req.system_id),
            Some(role.id),
            serde_json::json!({ "role": role.name, "expiry": expiry }),
        )
        .await;
        self.resolver.invalidate_group(group_id).await?;

        info!(actor_id = %ctx.user_id, group_id = %group_id, role = %role.name, "Group permission granted");

        Ok(permission)
    }

    /// Revokes a group permission. The permission must belong to the
    /// named group.
    pub async fn revoke_from_group(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        permission_id: Uuid,
    ) -> Result<GroupPermission, AppError> {
        self.resolver
            .require(ctx.user_id, systems::PERMISSIONS, systems::ROLE_WRITE)
            .await?;

        let existing = self.permissions.find_group_permission_by_id(permission_id).await?;
        if !existing.is_some_and(|p| p.group_id == group_id) {
            return Err(AppError::not_found(format!(
                "Permission {permission_id} not found"
            )));
        }

        let revoked = self
            .permissions
            .delete_group_permission(permission_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Permission {permission_id} not found"))
            })?;

        self.record(
            ctx,
            AuditAction::GroupPermissionRevoked,
            None,
            Some(revoked.group_id),
            Some(revoked.system_id.clone()),
            Some(revoked.role_id),
            serde_json::json!({ "permission_id": permission_id }),
        )
        .await;
        self.resolver.invalidate_group(revoked.group_id).await?;

        info!(actor_id = %ctx.user_id, group_id = %revoked.group_id, "Group permission revoked");

        Ok(revoked)
    }

    /// Resolves the caller's own access in a system. Available to every
    /// authenticated user; a denied result is a normal response, not an
    /// error.
    pub async fn check(
        &self,
        ctx: &RequestContext,
        system_id: &str,
        role: &str,
    ) -> Result<Access, AppError> {
        self.resolver.resolve(ctx.user_id, system_id, role).await
    }

    /// Appends an audit entry. Audit failures are logged, never
    /// propagated; the permission change itself already committed.
    #[allow(clippy::too_many_arguments)]
    async fn record(
        &self,
        ctx: &RequestContext,
        action: AuditAction,
        user_id: Option<Uuid>,
        group_id: Option<Uuid>,
        system_id: Option<String>,
        role_id: Option<Uuid>,
        details: serde_json::Value,
    ) {
        let entry = CreatePermissionAudit {
            action: action.as_str().to_string(),
            user_id,
            group_id,
            system_id,
            role_id,
            actor_id: ctx.user_id,
            details: Some(details),
        };
        if let Err(e) = self.audit.create(&entry).await {
            tracing::warn!(action = %action, error = %e, "Failed to write audit entry");
        }
    }
}

/// Parses an optional RFC 3339 expiry string.
pub(crate) fn parse_expiry(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| {
                AppError::validation(format!("Invalid expiry '{s}': expected an RFC 3339 timestamp"))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_expiry() {
        let parsed = parse_expiry(Some("2026-01-01T00:00:00Z")).unwrap().unwrap();
        assert_eq!(parsed.timestamp(), 1_767_225_600);
    }

    #[test]
    fn missing_expiry_is_none() {
        assert!(parse_expiry(None).unwrap().is_none());
    }

    #[test]
    fn malformed_expiry_is_a_validation_error() {
        let err = parse_expiry(Some("next tuesday")).unwrap_err();
        assert_eq!(err.kind, docsuite_core::error::ErrorKind::Validation);
    }
}
