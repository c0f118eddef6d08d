//! Permission audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable audit log entry recording a permission change.
///
/// The log is append-only; nothing in the application updates or deletes
/// rows once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PermissionAudit {
    /// Unique audit entry identifier.
    pub id: Uuid,
    /// The action tag (e.g. `"GRANTED"`, `"ADD_USER_TO_GROUP"`).
    pub action: String,
    /// The user the action affected (if any).
    pub user_id: Option<Uuid>,
    /// The group the action affected (if any).
    pub group_id: Option<Uuid>,
    /// The system the action was scoped to (if any).
    pub system_id: Option<String>,
    /// The role involved (if any).
    pub role_id: Option<Uuid>,
    /// The user who performed the action.
    pub actor_id: Uuid,
    /// Additional details about the action (JSON).
    pub details: Option<serde_json::Value>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermissionAudit {
    /// The action tag.
    pub action: String,
    /// Affected user.
    pub user_id: Option<Uuid>,
    /// Affected group.
    pub group_id: Option<Uuid>,
    /// Scoped system.
    pub system_id: Option<String>,
    /// Involved role.
    pub role_id: Option<Uuid>,
    /// The acting user.
    pub actor_id: Uuid,
    /// Additional details.
    pub details: Option<serde_json::Value>,
}
