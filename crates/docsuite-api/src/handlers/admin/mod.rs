//! Administrative handlers.

pub mod audit;
pub mod users;
