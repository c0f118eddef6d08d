//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use docsuite_auth::jwt::JwtDecoder;
use docsuite_cache::provider::CacheManager;
use docsuite_core::config::AppConfig;
use docsuite_database::DatabasePool;
use docsuite_service::{
    AdminUserService, AuditService, AuthService, DocumentService, DownloadService, GroupService,
    InviteService, PermissionService, RoleService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool wrapper (health checks).
    pub db: DatabasePool,
    /// Cache manager (Redis or in-memory).
    pub cache: Arc<CacheManager>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,

    /// Session lifecycle service.
    pub auth_service: Arc<AuthService>,
    /// User self-service.
    pub user_service: Arc<UserService>,
    /// Admin user management.
    pub admin_user_service: Arc<AdminUserService>,
    /// Group and membership management.
    pub group_service: Arc<GroupService>,
    /// Role registry.
    pub role_service: Arc<RoleService>,
    /// Permission grant management.
    pub permission_service: Arc<PermissionService>,
    /// Invitation issuing and acceptance.
    pub invite_service: Arc<InviteService>,
    /// Document management.
    pub document_service: Arc<DocumentService>,
    /// Attachment downloads.
    pub download_service: Arc<DownloadService>,
    /// Audit log access.
    pub audit_service: Arc<AuditService>,
}
