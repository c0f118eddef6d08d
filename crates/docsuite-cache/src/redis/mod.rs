//! Redis backend: connection wrapper plus the [`CacheProvider`]
//! implementation on top of it.
//!
//! [`CacheProvider`]: docsuite_core::traits::cache::CacheProvider

use docsuite_core::error::{AppError, ErrorKind};

pub mod client;
pub mod operations;

pub use client::RedisClient;
pub use operations::RedisCacheProvider;

pub(crate) fn redis_error(command: &'static str) -> impl FnOnce(redis::RedisError) -> AppError {
    move |e| AppError::with_source(ErrorKind::Cache, format!("redis {command} failed"), e)
}
