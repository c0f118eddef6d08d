//! Role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The administrative override role. A user holding this role in any
/// system passes every access check.
pub const ADMIN_ROLE: &str = "Admin";

/// The wildcard system scope. A permission scoped to `*` applies to
/// every system.
pub const WILDCARD_SYSTEM: &str = "*";

/// A named role in the registry (e.g. `"read"`, `"write"`, `"Admin"`).
///
/// Roles carry an optional system scope; an unscoped role can be granted
/// against any system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique role name.
    pub name: String,
    /// Optional system this role is scoped to.
    pub system_id: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// Check if this is the administrative override role.
    pub fn is_admin(&self) -> bool {
        self.name == ADMIN_ROLE
    }
}

/// Data required to create a new role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    /// Unique role name.
    pub name: String,
    /// Optional system scope.
    pub system_id: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}
