//! Group membership entities.

pub mod model;

pub use model::{CreateGroup, Group, UserGroup};
