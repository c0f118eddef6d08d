//! Group and membership management.

pub mod service;

pub use service::GroupService;
