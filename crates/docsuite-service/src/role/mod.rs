//! Role registry service.

pub mod service;

pub use service::RoleService;
