//! User rows and their write shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::UserStatus;

/// A registered account.
///
/// Users carry no role column of their own; all access flows through
/// the permission tables, so an account with zero grant rows is denied
/// everywhere except public routes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    /// Unique, matched case-insensitively.
    pub email: String,
    /// Unique, matched case-insensitively.
    pub username: String,
    /// Argon2id hash. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Admin who provisioned the account; `None` for invite signups.
    pub created_by: Option<Uuid>,
}

impl User {
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_by: Option<Uuid>,
}

/// Profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
}
