//! Cache backend configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Which backend to run: `"memory"` or `"redis"`.
    #[serde(default = "defaults::provider")]
    pub provider: String,
    #[serde(default)]
    pub redis: RedisCacheConfig,
    #[serde(default)]
    pub memory: MemoryCacheConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: defaults::provider(),
            redis: RedisCacheConfig::default(),
            memory: MemoryCacheConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisCacheConfig {
    pub url: String,
    /// Prepended to every key so several applications can share one
    /// Redis instance.
    #[serde(default = "defaults::key_prefix")]
    pub key_prefix: String,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            key_prefix: defaults::key_prefix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    #[serde(default = "defaults::max_capacity")]
    pub max_capacity: u64,
    /// Upper bound on entry lifetime; individual entries may carry a
    /// shorter TTL.
    #[serde(default = "defaults::memory_ttl")]
    pub time_to_live_seconds: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: defaults::max_capacity(),
            time_to_live_seconds: defaults::memory_ttl(),
        }
    }
}

mod defaults {
    pub fn provider() -> String {
        "memory".to_string()
    }
    pub fn key_prefix() -> String {
        "docsuite:".to_string()
    }
    pub fn max_capacity() -> u64 {
        10_000
    }
    pub fn memory_ttl() -> u64 {
        300
    }
}
