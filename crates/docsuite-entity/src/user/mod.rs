//! User domain entities.

pub mod model;
pub mod status;

pub use model::{CreateUser, UpdateUser, User};
pub use status::UserStatus;
