//! Seam between services and the cache backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// A string-keyed, string-valued cache with per-entry TTLs.
///
/// Values the application caches are short-lived JSON blobs (resolved
/// access decisions, token blocklist markers), so the interface stays
/// deliberately small. Implementations own key prefixing.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// `None` when the key is absent or its TTL has lapsed.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key` for at most `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Drop a single key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Drop every key matching a trailing-wildcard pattern such as
    /// `"perm:u1:*"`. Returns how many keys were removed.
    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64>;

    /// Whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
