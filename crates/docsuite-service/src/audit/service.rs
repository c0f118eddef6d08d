//! Read-only access to the permission audit log.

use std::sync::Arc;

use uuid::Uuid;

use docsuite_auth::PermissionResolver;
use docsuite_core::error::AppError;
use docsuite_core::types::pagination::{PageRequest, PageResponse};
use docsuite_database::repositories::PermissionAuditRepository;
use docsuite_entity::audit::AuditAction;
use docsuite_entity::audit::model::PermissionAudit;

use crate::context::RequestContext;
use crate::systems;

/// Filters for searching the audit log.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Restrict to one acting user.
    pub actor_id: Option<Uuid>,
    /// Restrict to one action tag.
    pub action: Option<AuditAction>,
    /// Restrict to entries affecting one user.
    pub user_id: Option<Uuid>,
}

/// Read-only audit log service. The log itself is append-only; the only
/// writers are the permission, group, and invite services.
#[derive(Debug, Clone)]
pub struct AuditService {
    /// Audit log repository.
    audit: Arc<PermissionAuditRepository>,
    /// Permission resolver for access checks.
    resolver: Arc<PermissionResolver>,
}

impl AuditService {
    /// Creates a new audit service.
    pub fn new(audit: Arc<PermissionAuditRepository>, resolver: Arc<PermissionResolver>) -> Self {
        Self { audit, resolver }
    }

    /// Searches the audit log.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        filter: &AuditFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<PermissionAudit>, AppError> {
        self.resolver
            .require(ctx.user_id, systems::AUDIT, systems::ROLE_READ)
            .await?;

        self.audit
            .search(
                filter.actor_id,
                filter.action.map(|a| a.as_str()),
                filter.user_id,
                page,
            )
            .await
    }
}
