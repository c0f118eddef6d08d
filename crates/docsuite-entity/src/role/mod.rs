//! Role registry entities.

pub mod model;

pub use model::{CreateRole, Role};
