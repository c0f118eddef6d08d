//! Postgres pool setup.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use docsuite_core::config::DatabaseConfig;
use docsuite_core::error::{AppError, ErrorKind};

/// Shared handle to the Postgres pool. Cheap to clone; every repository
/// holds one.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `config` and verify connectivity.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        debug!(url = %redact_url(&config.url), "opening postgres pool");

        let options = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        let pool = options.connect(&config.url).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "could not connect to postgres", e)
        })?;

        info!(
            max_connections = config.max_connections,
            "postgres pool ready"
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query; used by the health endpoint.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "health probe failed", e))?;
        Ok(one == 1)
    }

    /// Drain and close every connection. Called on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("postgres pool closed");
    }
}

/// Strip the password from a connection URL before it reaches a log line.
fn redact_url(url: &str) -> String {
    let Some(at) = url.find('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map_or(0, |p| p + 3);
    match url[scheme_end..at].find(':') {
        Some(colon) => {
            let colon = scheme_end + colon;
            format!("{}:****{}", &url[..colon], &url[at..])
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::redact_url;

    #[test]
    fn redacts_password_component() {
        assert_eq!(
            redact_url("postgres://docsuite:hunter2@db:5432/docsuite"),
            "postgres://docsuite:****@db:5432/docsuite"
        );
    }

    #[test]
    fn leaves_urls_without_credentials_alone() {
        assert_eq!(
            redact_url("postgres://localhost:5432/docsuite"),
            "postgres://localhost:5432/docsuite"
        );
    }

    #[test]
    fn leaves_user_only_urls_alone() {
        assert_eq!(
            redact_url("postgres://docsuite@db/docsuite"),
            "postgres://docsuite@db/docsuite"
        );
    }
}
