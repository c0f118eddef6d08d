//! Group entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named group of users. Group permissions apply to every member.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Unique group identifier.
    pub id: Uuid,
    /// Unique group name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
    /// When the group was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A membership edge between a user and a group.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserGroup {
    /// The member.
    pub user_id: Uuid,
    /// The group.
    pub group_id: Uuid,
    /// The user who added this member.
    pub added_by: Option<Uuid>,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroup {
    /// Unique group name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Users to enroll at creation time. Inserted in the same
    /// transaction as the group row.
    pub initial_user_ids: Vec<Uuid>,
}
