//! Invite status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an invitation. An invite is consumed exactly
/// once; acceptance is a one-way transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invite_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    /// Issued but not yet accepted.
    Pending,
    /// Accepted; linked to the created or reconciled user.
    Accepted,
}

impl InviteStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
