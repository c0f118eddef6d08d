//! Shared traits used across the DocSuite workspace.

pub mod cache;

pub use cache::CacheProvider;
