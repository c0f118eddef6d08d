//! Harness shared by the integration suite: boots a full router over a
//! real database and drives it with in-process requests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use docsuite_auth::access::PermissionResolver;
use docsuite_auth::jwt::{JwtDecoder, JwtEncoder};
use docsuite_auth::password::PasswordHasher;
use docsuite_cache::provider::CacheManager;
use docsuite_core::config::AppConfig;
use docsuite_database::repositories::{
    DocumentCategoryRepository, DocumentRepository, GroupRepository, InviteRepository,
    PermissionAuditRepository, PermissionRepository, RoleRepository, UserRepository,
};
use docsuite_database::DatabasePool;
use docsuite_service::{
    AdminUserService, AuditService, AuthService, DocumentService, DownloadService, GroupService,
    InviteService, PermissionService, RoleService, UserService,
};

pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
}

impl TestApp {
    /// Wires every layer together the same way `main` does, against the
    /// `test` profile. Returns `None` when no database is reachable so
    /// tests can bail out instead of failing.
    pub async fn try_new() -> Option<Self> {
        let mut config = AppConfig::load("test").ok()?;
        config.cache.provider = "memory".to_string();

        let Ok(db) = DatabasePool::connect(&config.database).await else {
            eprintln!("skipping: test database unavailable");
            return None;
        };

        docsuite_database::migration::run_migrations(db.pool())
            .await
            .expect("migrations should apply cleanly");

        Self::reset_tables(db.pool()).await;

        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("memory cache should always construct"),
        );

        let pool = db.pool().clone();
        let users = Arc::new(UserRepository::new(pool.clone()));
        let groups = Arc::new(GroupRepository::new(pool.clone()));
        let roles = Arc::new(RoleRepository::new(pool.clone()));
        let permissions = Arc::new(PermissionRepository::new(pool.clone()));
        let audit = Arc::new(PermissionAuditRepository::new(pool.clone()));
        let invites = Arc::new(InviteRepository::new(pool.clone()));
        let documents = Arc::new(DocumentRepository::new(pool.clone()));
        let categories = Arc::new(DocumentCategoryRepository::new(pool.clone()));

        let hasher = Arc::new(PasswordHasher::new());
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth, cache.clone()));
        let resolver = Arc::new(PermissionResolver::new(
            permissions.clone(),
            cache.clone(),
            config.auth.permission_cache_ttl_seconds,
        ));

        let password_min = config.auth.password_min_length;

        let state = docsuite_api::state::AppState {
            config: Arc::new(config),
            db,
            cache: cache.clone(),
            jwt_decoder: decoder.clone(),
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                hasher.clone(),
                encoder.clone(),
                decoder.clone(),
            )),
            user_service: Arc::new(UserService::new(
                users.clone(),
                groups.clone(),
                hasher.clone(),
                password_min,
            )),
            admin_user_service: Arc::new(AdminUserService::new(
                users.clone(),
                hasher.clone(),
                resolver.clone(),
                password_min,
            )),
            group_service: Arc::new(GroupService::new(
                groups.clone(),
                users.clone(),
                audit.clone(),
                resolver.clone(),
            )),
            role_service: Arc::new(RoleService::new(roles.clone(), resolver.clone())),
            permission_service: Arc::new(PermissionService::new(
                permissions.clone(),
                users.clone(),
                roles.clone(),
                groups.clone(),
                audit.clone(),
                resolver.clone(),
            )),
            invite_service: Arc::new(InviteService::new(
                invites,
                users,
                roles,
                permissions,
                audit.clone(),
                hasher,
                encoder,
                decoder,
                resolver.clone(),
            )),
            document_service: Arc::new(DocumentService::new(
                documents,
                categories,
                resolver.clone(),
            )),
            download_service: Arc::new(DownloadService::new(
                &docsuite_core::config::uploads::UploadsConfig::default(),
                resolver.clone(),
            )),
            audit_service: Arc::new(AuditService::new(audit, resolver)),
        };

        let router = docsuite_api::router::build_app(state);

        Some(Self { router, pool })
    }

    /// Wipes data tables between runs. Migration-seeded roles survive
    /// because the roles table is not on the list.
    async fn reset_tables(pool: &PgPool) {
        for table in [
            "document_versions",
            "documents",
            "document_categories",
            "permission_audit",
            "invites",
            "permissions",
            "group_permissions",
            "user_groups",
            "groups",
            "users",
        ] {
            let _ = sqlx::query(&format!("DELETE FROM {table}")).execute(pool).await;
        }
    }

    /// Inserts an account directly, bypassing the API, and returns its id.
    pub async fn create_test_user(&self, username: &str, password: &str) -> Uuid {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("hashing a fixed password should work");
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO users (id, email, username, password_hash, display_name) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(format!("{username}@test.com"))
        .bind(username)
        .bind(&hash)
        .bind(username)
        .execute(&self.pool)
        .await
        .expect("user insert should succeed");

        id
    }

    /// Grants `role_name` in `system_id` directly to a user.
    pub async fn grant(&self, user_id: Uuid, system_id: &str, role_name: &str) {
        sqlx::query(
            "INSERT INTO permissions (user_id, system_id, role_id) \
             VALUES ($1, $2, (SELECT id FROM roles WHERE name = $3))",
        )
        .bind(user_id)
        .bind(system_id)
        .bind(role_name)
        .execute(&self.pool)
        .await
        .expect("grant insert should succeed");
    }

    /// An account holding the `Admin` override role across all systems.
    pub async fn create_admin(&self, username: &str, password: &str) -> Uuid {
        let id = self.create_test_user(username, password).await;
        self.grant(id, "*", "Admin").await;
        id
    }

    /// Logs in through the API and returns the access token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let credentials = serde_json::json!({
            "username": username,
            "password": password,
        });
        let response = self
            .request("POST", "/api/auth/login", Some(credentials), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "login for {username} failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("login body should carry an access_token")
            .to_string()
    }

    /// Drives one request through the router without binding a socket.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let payload = match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };
        let request = builder
            .body(payload)
            .expect("request pieces should assemble");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router should produce a response");
        let status = response.status();
        let raw = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .expect("response body should be readable");

        TestResponse {
            status,
            body: serde_json::from_slice(&raw).unwrap_or(Value::Null),
        }
    }
}

/// Status plus parsed JSON body of one in-process request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Skips the current test when no database is available.
macro_rules! test_app {
    () => {
        match crate::helpers::TestApp::try_new().await {
            Some(app) => app,
            None => return,
        }
    };
}

pub(crate) use test_app;
