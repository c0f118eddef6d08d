//! Invitation entities.

pub mod model;
pub mod status;

pub use model::{CreateInvite, Invite};
pub use status::InviteStatus;
