//! Token signing.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

use docsuite_core::config::auth::AuthConfig;
use docsuite_core::error::AppError;

use super::claims::{Claims, InviteClaims, TokenType};

/// Signs access, refresh and invite tokens with the configured HMAC
/// secret.
#[derive(Clone)]
pub struct JwtEncoder {
    key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    invite_ttl: Duration,
}

// EncodingKey holds the secret; keep it out of Debug output.
impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish_non_exhaustive()
    }
}

/// What a successful login hands back.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.jwt_access_ttl_minutes as i64),
            refresh_ttl: Duration::hours(config.jwt_refresh_ttl_hours as i64),
            invite_ttl: Duration::hours(config.invite_ttl_hours as i64),
        }
    }

    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.key)
            .map_err(|e| AppError::internal(format!("token signing failed: {e}")))
    }

    fn user_claims(
        &self,
        user_id: Uuid,
        username: &str,
        token_type: TokenType,
        ttl: Duration,
    ) -> (Claims, DateTime<Utc>) {
        let now = Utc::now();
        let expires = now + ttl;
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        };
        (claims, expires)
    }

    /// Fresh access + refresh pair, issued at login and on refresh.
    pub fn generate_token_pair(
        &self,
        user_id: Uuid,
        username: &str,
    ) -> Result<TokenPair, AppError> {
        let (access, access_expires_at) =
            self.user_claims(user_id, username, TokenType::Access, self.access_ttl);
        let (refresh, refresh_expires_at) =
            self.user_claims(user_id, username, TokenType::Refresh, self.refresh_ttl);

        Ok(TokenPair {
            access_token: self.sign(&access)?,
            refresh_token: self.sign(&refresh)?,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Signed invite acceptance token carrying the invite id.
    pub fn generate_invite_token(&self, invite_id: Uuid, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = InviteClaims {
            sub: invite_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.invite_ttl).timestamp(),
        };
        self.sign(&claims)
    }
}
