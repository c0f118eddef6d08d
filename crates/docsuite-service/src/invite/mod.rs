//! Invitation issuing and acceptance.

pub mod service;

pub use service::{InviteOutcome, InviteService};
