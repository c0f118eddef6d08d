//! Configuration schema and loading.
//!
//! Layered sources, later wins: `config/default.toml`, then the
//! environment overlay `config/<env>.toml`, then `DOCSUITE__`-prefixed
//! environment variables with `__` as the section separator
//! (`DOCSUITE__DATABASE__URL` overrides `[database].url`).

pub mod app;
pub mod auth;
pub mod cache;
pub mod logging;
pub mod uploads;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::cache::CacheConfig;
use self::logging::LoggingConfig;
use self::uploads::UploadsConfig;

use crate::error::AppError;

/// Deserialization target for the merged configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self, AppError> {
        let merged = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("DOCSUITE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(merged.try_deserialize()?)
    }
}

/// Connection pool settings for Postgres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "defaults::max_connections")]
    pub max_connections: u32,
    #[serde(default = "defaults::min_connections")]
    pub min_connections: u32,
    #[serde(default = "defaults::connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "defaults::idle_timeout")]
    pub idle_timeout_seconds: u64,
}

mod defaults {
    pub fn max_connections() -> u32 {
        20
    }
    pub fn min_connections() -> u32 {
        5
    }
    pub fn connect_timeout() -> u64 {
        10
    }
    pub fn idle_timeout() -> u64 {
        300
    }
}
