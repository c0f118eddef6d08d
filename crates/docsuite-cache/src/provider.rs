//! Backend selection.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use docsuite_core::config::cache::CacheConfig;
use docsuite_core::error::AppError;
use docsuite_core::result::AppResult;
use docsuite_core::traits::cache::CacheProvider;

/// The cache handle the rest of the application holds. Picks a backend
/// from config at startup and forwards every call to it.
#[derive(Debug, Clone)]
pub struct CacheManager {
    inner: Arc<dyn CacheProvider>,
}

impl CacheManager {
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn CacheProvider> = match config.provider.as_str() {
            #[cfg(feature = "memory")]
            "memory" => {
                info!("cache backend: in-memory");
                Arc::new(crate::memory::MemoryCacheProvider::new(&config.memory))
            }
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("cache backend: redis");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisCacheProvider::new(client))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "unknown cache provider '{other}' (expected memory or redis)"
                )));
            }
        };
        Ok(Self { inner })
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        self.inner.delete_pattern(pattern).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
