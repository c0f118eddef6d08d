//! Token validation and revocation.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use uuid::Uuid;

use docsuite_cache::keys;
use docsuite_cache::provider::CacheManager;
use docsuite_core::config::auth::AuthConfig;
use docsuite_core::error::AppError;
use docsuite_core::traits::CacheProvider;

use super::claims::{Claims, InviteClaims, TokenType};

/// Verifies token signatures and consults the revocation blocklist.
#[derive(Clone)]
pub struct JwtDecoder {
    key: DecodingKey,
    validation: Validation,
    cache: Arc<CacheManager>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    pub fn new(config: &AuthConfig, cache: Arc<CacheManager>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Tolerate small clock skew between issuer and verifier.
        validation.leeway = 5;

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            cache,
        }
    }

    /// Verify signature and expiry, require the access family, and
    /// reject revoked jtis.
    pub async fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_user_token(token, TokenType::Access).await
    }

    /// Same checks as [`decode_access_token`](Self::decode_access_token)
    /// for the refresh family.
    pub async fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_user_token(token, TokenType::Refresh).await
    }

    pub fn decode_invite_token(&self, token: &str) -> Result<InviteClaims, AppError> {
        decode::<InviteClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(translate_jwt_error)
    }

    async fn decode_user_token(
        &self,
        token: &str,
        expected: TokenType,
    ) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(translate_jwt_error)?;

        if claims.token_type != expected {
            return Err(AppError::authentication("wrong token type"));
        }

        let key = keys::jwt_blocklist(&claims.jti.to_string());
        if self.cache.get(&key).await.ok().flatten().is_some() {
            return Err(AppError::authentication("token has been revoked"));
        }

        Ok(claims)
    }

    /// Mark a jti revoked until the token would have expired anyway.
    pub async fn blocklist_token(
        &self,
        jti: Uuid,
        remaining_ttl_seconds: u64,
    ) -> Result<(), AppError> {
        // Floor of one minute so tokens straddling expiry still land on
        // the blocklist through any clock skew window.
        let ttl = Duration::from_secs(remaining_ttl_seconds.max(60));
        self.cache
            .set(&keys::jwt_blocklist(&jti.to_string()), "revoked", ttl)
            .await
            .map_err(|e| AppError::internal(format!("blocklist write failed: {e}")))
    }
}

fn translate_jwt_error(e: jsonwebtoken::errors::Error) -> AppError {
    use jsonwebtoken::errors::ErrorKind;
    let message = match e.kind() {
        ErrorKind::ExpiredSignature => "token has expired",
        ErrorKind::InvalidToken => "malformed token",
        ErrorKind::InvalidSignature => "bad token signature",
        _ => "token validation failed",
    };
    AppError::authentication(message)
}
