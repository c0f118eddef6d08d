//! Permission grant management.

pub mod service;

pub use service::{GrantPermissionRequest, PermissionService};
