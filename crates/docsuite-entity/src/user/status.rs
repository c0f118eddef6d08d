//! Account status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Accounts are never hard-deleted; deactivation flips the status and
/// every historical reference stays intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        };
        f.write_str(tag)
    }
}

impl FromStr for UserStatus {
    type Err = docsuite_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(docsuite_core::AppError::validation(format!(
                "'{other}' is not a user status (active or inactive)"
            ))),
        }
    }
}
