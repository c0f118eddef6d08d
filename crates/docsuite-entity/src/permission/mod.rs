//! Permission store entities.

pub mod model;

pub use model::{CreateGroupPermission, CreatePermission, GroupPermission, Permission};
