//! Permission entity models.
//!
//! A permission is a (subject, system, role) triple with an optional
//! expiry. Expired rows are treated as absent at evaluation time but are
//! never eagerly deleted; revocation is the only operation that removes
//! a row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A direct permission grant to a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// The user this grant applies to.
    pub user_id: Uuid,
    /// The system the grant is scoped to (`*` for all systems).
    pub system_id: String,
    /// The granted role.
    pub role_id: Uuid,
    /// Optional expiry; `None` means the grant never expires.
    pub expiry: Option<DateTime<Utc>>,
    /// The user who issued the grant.
    pub granted_by: Option<Uuid>,
    /// When the grant was issued.
    pub created_at: DateTime<Utc>,
}

/// A permission grant to a group, inherited by all members.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupPermission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// The group this grant applies to.
    pub group_id: Uuid,
    /// The system the grant is scoped to (`*` for all systems).
    pub system_id: String,
    /// The granted role.
    pub role_id: Uuid,
    /// Optional expiry; `None` means the grant never expires.
    pub expiry: Option<DateTime<Utc>>,
    /// The user who issued the grant.
    pub granted_by: Option<Uuid>,
    /// When the grant was issued.
    pub created_at: DateTime<Utc>,
}

/// Data required to grant a permission to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermission {
    /// The user to grant to.
    pub user_id: Uuid,
    /// The target system.
    pub system_id: String,
    /// The role to grant.
    pub role_id: Uuid,
    /// Optional expiry.
    pub expiry: Option<DateTime<Utc>>,
    /// The granting user.
    pub granted_by: Option<Uuid>,
}

/// Data required to grant a permission to a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupPermission {
    /// The group to grant to.
    pub group_id: Uuid,
    /// The target system.
    pub system_id: String,
    /// The role to grant.
    pub role_id: Uuid,
    /// Optional expiry.
    pub expiry: Option<DateTime<Utc>>,
    /// The granting user.
    pub granted_by: Option<Uuid>,
}

impl Permission {
    /// Check if this grant has lapsed. Expiry is evaluated lazily; an
    /// expired row behaves exactly like an absent one.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expiry, Some(expiry) if expiry <= now)
    }
}

impl GroupPermission {
    /// Check if this grant has lapsed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expiry, Some(expiry) if expiry <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn permission(expiry: Option<DateTime<Utc>>) -> Permission {
        Permission {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            system_id: "policies".to_string(),
            role_id: Uuid::new_v4(),
            expiry,
            granted_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn no_expiry_never_lapses() {
        let now = Utc::now();
        assert!(!permission(None).is_expired_at(now));
    }

    #[test]
    fn future_expiry_is_active() {
        let now = Utc::now();
        assert!(!permission(Some(now + Duration::hours(1))).is_expired_at(now));
    }

    #[test]
    fn past_expiry_has_lapsed() {
        let now = Utc::now();
        assert!(permission(Some(now - Duration::seconds(1))).is_expired_at(now));
        assert!(permission(Some(now)).is_expired_at(now));
    }
}
