//! # docsuite-cache
//!
//! Cache backends behind the `CacheProvider` trait: an in-process moka
//! store (the default) and Redis for multi-instance deployments. The
//! backend is chosen from configuration at startup; see
//! [`CacheManager`].

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
