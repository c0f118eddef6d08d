//! Invitation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::InviteStatus;

/// An invitation to join the system. Acceptance creates (or reconciles)
/// the invited user and grants the named role.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invite {
    /// Unique invite identifier.
    pub id: Uuid,
    /// The invited email address.
    pub email: String,
    /// Role name to grant on acceptance.
    pub role_name: String,
    /// Lifecycle status.
    pub status: InviteStatus,
    /// The user who issued the invite.
    pub invited_by: Uuid,
    /// The user created or reconciled on acceptance.
    pub accepted_user_id: Option<Uuid>,
    /// When the invite was issued.
    pub created_at: DateTime<Utc>,
    /// When the invite was accepted.
    pub accepted_at: Option<DateTime<Utc>>,
}

/// Data required to issue a new invite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvite {
    /// The invited email address.
    pub email: String,
    /// Role name to grant on acceptance.
    pub role_name: String,
    /// The issuing user.
    pub invited_by: Uuid,
}
