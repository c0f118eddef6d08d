//! Redis connection handling.

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use docsuite_core::config::cache::RedisCacheConfig;
use docsuite_core::result::AppResult;

use super::redis_error;

/// Wraps a reconnecting [`ConnectionManager`] and applies the configured
/// key prefix.
#[derive(Debug, Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisClient {
    pub async fn connect(config: &RedisCacheConfig) -> AppResult<Self> {
        let client =
            Client::open(config.url.as_str()).map_err(redis_error("parse redis url"))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(redis_error("connect to redis"))?;

        info!("redis connection established");
        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// ConnectionManager is internally shared; a clone is a handle, not a
    /// new connection.
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }

    pub fn prefixed(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }
}
