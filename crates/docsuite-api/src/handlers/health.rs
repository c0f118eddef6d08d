//! Health check handlers.

use axum::extract::State;
use axum::Json;

use docsuite_core::traits::cache::CacheProvider;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

/// `GET /api/health/detailed`
///
/// Probes the database and cache. A failed probe reports `"down"` for
/// that component instead of failing the request.
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Result<Json<DetailedHealthResponse>, ApiError> {
    let database = match state.db.health_check().await {
        Ok(true) => "up",
        _ => "down",
    };

    let cache = match state.cache.health_check().await {
        Ok(true) => "up",
        _ => "down",
    };

    let status = if database == "up" && cache == "up" {
        "ok"
    } else {
        "degraded"
    };

    Ok(Json(DetailedHealthResponse {
        status: status.to_owned(),
        database: database.to_owned(),
        cache: cache.to_owned(),
    }))
}
