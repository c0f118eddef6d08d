//! Route definitions and application assembly.

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post, put};
use axum::{middleware as axum_middleware, Router};
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use docsuite_core::config::app::CorsConfig;

use crate::handlers::{admin, auth, document, download, group, health, invite, permission, role, user};
use crate::middleware::request_logging;
use crate::state::AppState;

/// Builds the full application router with all middleware layers.
pub fn build_app(state: AppState) -> Router {
    let api = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes())
        .merge(group_routes())
        .merge(permission_routes())
        .merge(role_routes())
        .merge(invite_routes())
        .merge(document_routes());

    let body_limit = state.config.server.body_limit_mb * 1024 * 1024;
    let cors = cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/detailed", get(health::health_detailed))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(user::get_profile).put(user::update_profile))
        .route("/users/me/password", put(user::change_password))
        .route("/users/me/groups", get(user::my_groups))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/users",
            get(admin::users::list).post(admin::users::create),
        )
        .route(
            "/admin/users/{id}",
            get(admin::users::get)
                .put(admin::users::update)
                .delete(admin::users::deactivate),
        )
        .route("/admin/users/{id}/status", put(admin::users::set_status))
        .route("/admin/audit", get(admin::audit::search))
}

fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/groups", get(group::list).post(group::create))
        .route("/groups/{id}", get(group::get))
        .route(
            "/groups/{id}/members",
            get(group::members).post(group::add_member),
        )
        .route(
            "/groups/{id}/members/{user_id}",
            delete(group::remove_member),
        )
}

fn permission_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/permissions/users/{id}",
            get(permission::list_for_user).post(permission::grant_to_user),
        )
        .route(
            "/permissions/users/{id}/{permission_id}",
            delete(permission::revoke_from_user),
        )
        .route(
            "/permissions/groups/{id}",
            get(permission::list_for_group).post(permission::grant_to_group),
        )
        .route(
            "/permissions/groups/{id}/{permission_id}",
            delete(permission::revoke_from_group),
        )
        .route("/permissions/check", get(permission::check))
}

fn role_routes() -> Router<AppState> {
    Router::new().route("/roles", get(role::list).post(role::create))
}

fn invite_routes() -> Router<AppState> {
    Router::new()
        .route("/invites", post(invite::create))
        .route("/accept-invite", get(invite::accept))
}

fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents/download/{*path}", get(download::download))
        .route(
            "/documents/{kind}",
            get(document::list)
                .post(document::create)
                .put(document::bulk_action),
        )
        .route(
            "/documents/{kind}/categories",
            get(document::list_categories).post(document::create_category),
        )
        .route(
            "/documents/{kind}/{id}",
            get(document::get)
                .put(document::update)
                .patch(document::apply_action)
                .delete(document::delete),
        )
        .route(
            "/documents/{kind}/{id}/versions",
            get(document::versions).post(document::publish_version),
        )
}

/// Builds the CORS layer from configuration. A literal `"*"` entry
/// switches that dimension to allow-any.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    fn parse<T: std::str::FromStr>(values: &[String]) -> Vec<T> {
        values.iter().filter_map(|v| v.parse().ok()).collect()
    }
    fn wildcard(values: &[String]) -> bool {
        values.iter().any(|v| v == "*")
    }

    let origins: AllowOrigin = if wildcard(&config.allowed_origins) {
        Any.into()
    } else {
        parse::<HeaderValue>(&config.allowed_origins).into()
    };
    let methods: AllowMethods = parse::<Method>(&config.allowed_methods).into();
    let headers: AllowHeaders = if wildcard(&config.allowed_headers) {
        Any.into()
    } else {
        parse::<axum::http::HeaderName>(&config.allowed_headers).into()
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .max_age(Duration::from_secs(config.max_age_seconds))
}
