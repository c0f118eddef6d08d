//! [`CacheProvider`] over Redis.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use docsuite_core::result::AppResult;
use docsuite_core::traits::cache::CacheProvider;

use super::client::RedisClient;
use super::redis_error;

#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
}

impl RedisCacheProvider {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.connection();
        conn.get(self.client.prefixed(key))
            .await
            .map_err(redis_error("GET"))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut conn = self.client.connection();
        // SET with EX; a zero TTL would mean "no expiry" to Redis, so
        // clamp to one second.
        let secs = ttl.as_secs().max(1);
        conn.set_ex(self.client.prefixed(key), value, secs)
            .await
            .map_err(redis_error("SETEX"))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.client.connection();
        conn.del(self.client.prefixed(key))
            .await
            .map_err(redis_error("DEL"))
    }

    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        let mut conn = self.client.connection();

        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(self.client.prefixed(pattern))
            .query_async(&mut conn)
            .await
            .map_err(redis_error("KEYS"))?;

        if keys.is_empty() {
            return Ok(0);
        }

        let removed: u64 = conn.del(&keys).await.map_err(redis_error("DEL"))?;
        debug!(pattern, removed, "evicted keys by pattern");
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.connection();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(redis_error("PING"))?;
        Ok(pong == "PONG")
    }
}
