//! Claim payloads for the three token families.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload of access and refresh tokens. `jti` identifies the token for
/// revocation; `token_type` keeps one family from being replayed as the
/// other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

impl Claims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Seconds until expiry, zero once lapsed. Used to size the
    /// blocklist TTL on logout.
    pub fn remaining_ttl_seconds(&self) -> u64 {
        (self.exp - Utc::now().timestamp()).max(0) as u64
    }
}

/// Payload of an invite acceptance token. The signed token is all the
/// invited person receives; the invite row itself never leaves the
/// server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteClaims {
    /// Invite id.
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl InviteClaims {
    pub fn invite_id(&self) -> Uuid {
        self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lapsed_claims_report_zero_ttl() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: "someone".to_string(),
            iat: 0,
            exp: 1,
            jti: Uuid::new_v4(),
            token_type: TokenType::Access,
        };
        assert!(claims.is_expired());
        assert_eq!(claims.remaining_ttl_seconds(), 0);
    }
}
