//! Token and credential settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing secret shared by all token families.
    #[serde(default = "defaults::jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "defaults::access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    #[serde(default = "defaults::refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// How long an issued invite stays redeemable.
    #[serde(default = "defaults::invite_ttl")]
    pub invite_ttl_hours: u64,
    #[serde(default = "defaults::password_min")]
    pub password_min_length: usize,
    /// Lifetime of cached access decisions. Short on purpose: a revoked
    /// grant keeps working for at most this long.
    #[serde(default = "defaults::permission_cache_ttl")]
    pub permission_cache_ttl_seconds: u64,
}

mod defaults {
    pub fn jwt_secret() -> String {
        "CHANGE_ME_IN_PRODUCTION".to_string()
    }
    pub fn access_ttl() -> u64 {
        15
    }
    pub fn refresh_ttl() -> u64 {
        24
    }
    pub fn invite_ttl() -> u64 {
        72
    }
    pub fn password_min() -> usize {
        8
    }
    pub fn permission_cache_ttl() -> u64 {
        60
    }
}
