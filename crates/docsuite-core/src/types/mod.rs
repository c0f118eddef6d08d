//! Core type definitions used across the DocSuite workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
