//! Permission resolution.

pub mod resolver;

pub use resolver::{Access, AccessSource, PermissionResolver};
