//! In-process cache backed by moka.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use docsuite_core::config::cache::MemoryCacheConfig;
use docsuite_core::result::AppResult;
use docsuite_core::traits::cache::CacheProvider;

/// Entry value plus its own deadline. Moka's cache-wide TTL acts as an
/// upper bound; the deadline enforces the per-entry TTL the trait
/// promises.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, Entry>,
}

impl MemoryCacheProvider {
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();
        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let Some(entry) = self.cache.get(key).await else {
            return Ok(None);
        };
        if entry.expires_at <= Instant::now() {
            self.cache.remove(key).await;
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        // No pattern scan in moka; the glob is always a trailing
        // wildcard, so a prefix walk is enough.
        let prefix = pattern.trim_end_matches('*');
        let doomed: Vec<String> = self
            .cache
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.to_string())
            .collect();

        let count = doomed.len() as u64;
        for key in doomed {
            self.cache.remove(&key).await;
        }

        debug!(pattern, count, "evicted keys by pattern");
        Ok(count)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig {
            max_capacity: 1_000,
            time_to_live_seconds: 60,
        })
    }

    #[tokio::test]
    async fn round_trips_a_value() {
        let cache = store();
        cache.set("k", "v", Duration::from_secs(30)).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn per_entry_ttl_is_honored() {
        let cache = store();
        cache.set("gone", "v", Duration::ZERO).await.unwrap();
        assert_eq!(cache.get("gone").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_removes_only_that_key() {
        let cache = store();
        cache.set("a", "1", Duration::from_secs(30)).await.unwrap();
        cache.set("b", "2", Duration::from_secs(30)).await.unwrap();
        cache.delete("a").await.unwrap();
        assert_eq!(cache.get("a").await.unwrap(), None);
        assert_eq!(cache.get("b").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn pattern_delete_matches_prefix() {
        let cache = store();
        let ttl = Duration::from_secs(30);
        cache.set("perm:u1:policies:read", "allow", ttl).await.unwrap();
        cache.set("perm:u1:forms:read", "deny", ttl).await.unwrap();
        cache.set("perm:u2:policies:read", "allow", ttl).await.unwrap();

        let removed = cache.delete_pattern("perm:u1:*").await.unwrap();
        assert_eq!(removed, 2);
        assert!(cache.get("perm:u2:policies:read").await.unwrap().is_some());
    }
}
