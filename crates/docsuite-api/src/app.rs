//! Server bootstrap: dependency wiring and the serve loop.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use docsuite_auth::access::PermissionResolver;
use docsuite_auth::jwt::{JwtDecoder, JwtEncoder};
use docsuite_auth::password::PasswordHasher;
use docsuite_cache::provider::CacheManager;
use docsuite_core::config::AppConfig;
use docsuite_core::error::{AppError, ErrorKind};
use docsuite_database::repositories::{
    DocumentCategoryRepository, DocumentRepository, GroupRepository, InviteRepository,
    PermissionAuditRepository, PermissionRepository, RoleRepository, UserRepository,
};
use docsuite_database::DatabasePool;
use docsuite_service::{
    AdminUserService, AuditService, AuthService, DocumentService, DownloadService, GroupService,
    InviteService, PermissionService, RoleService, UserService,
};

use crate::router;
use crate::state::AppState;

/// Wires all dependencies and runs the HTTP server until shutdown.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    let config = Arc::new(config);

    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    let pool = db.pool().clone();
    let users = Arc::new(UserRepository::new(pool.clone()));
    let groups = Arc::new(GroupRepository::new(pool.clone()));
    let roles = Arc::new(RoleRepository::new(pool.clone()));
    let permissions = Arc::new(PermissionRepository::new(pool.clone()));
    let audit = Arc::new(PermissionAuditRepository::new(pool.clone()));
    let invites = Arc::new(InviteRepository::new(pool.clone()));
    let documents = Arc::new(DocumentRepository::new(pool.clone()));
    let categories = Arc::new(DocumentCategoryRepository::new(pool));

    let hasher = Arc::new(PasswordHasher::new());
    let encoder = Arc::new(JwtEncoder::new(&config.auth));
    let decoder = Arc::new(JwtDecoder::new(&config.auth, cache.clone()));
    let resolver = Arc::new(PermissionResolver::new(
        permissions.clone(),
        cache.clone(),
        config.auth.permission_cache_ttl_seconds,
    ));

    let password_min = config.auth.password_min_length;

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        hasher.clone(),
        encoder.clone(),
        decoder.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        users.clone(),
        groups.clone(),
        hasher.clone(),
        password_min,
    ));
    let admin_user_service = Arc::new(AdminUserService::new(
        users.clone(),
        hasher.clone(),
        resolver.clone(),
        password_min,
    ));
    let group_service = Arc::new(GroupService::new(
        groups.clone(),
        users.clone(),
        audit.clone(),
        resolver.clone(),
    ));
    let role_service = Arc::new(RoleService::new(roles.clone(), resolver.clone()));
    let permission_service = Arc::new(PermissionService::new(
        permissions.clone(),
        users.clone(),
        roles.clone(),
        groups,
        audit.clone(),
        resolver.clone(),
    ));
    let invite_service = Arc::new(InviteService::new(
        invites,
        users,
        roles,
        permissions,
        audit.clone(),
        hasher,
        encoder,
        decoder.clone(),
        resolver.clone(),
    ));
    let document_service = Arc::new(DocumentService::new(documents, categories, resolver.clone()));
    let download_service = Arc::new(DownloadService::new(&config.uploads, resolver.clone()));
    let audit_service = Arc::new(AuditService::new(audit, resolver));

    let state = AppState {
        config: config.clone(),
        db,
        cache,
        jwt_decoder: decoder,
        auth_service,
        user_service,
        admin_user_service,
        group_service,
        role_service,
        permission_service,
        invite_service,
        document_service,
        download_service,
        audit_service,
    };

    let app = router::build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e))?;

    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    info!("Server stopped");

    Ok(())
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
