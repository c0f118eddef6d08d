//! Login, logout, token refresh, and current-user lookup.

use std::sync::Arc;

use tracing::info;

use docsuite_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use docsuite_auth::password::PasswordHasher;
use docsuite_core::error::AppError;
use docsuite_database::repositories::UserRepository;
use docsuite_entity::user::User;

use crate::context::RequestContext;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// Fresh access and refresh tokens.
    pub tokens: TokenPair,
}

/// Handles session lifecycle: login, logout, and token refresh.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    users: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Token decoder (for refresh and logout blocklisting).
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Authenticates a user by username (or email) and password.
    ///
    /// Unknown accounts and wrong passwords produce the same error so
    /// the response does not leak which usernames exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = match self.users.find_by_username(username).await? {
            Some(user) => Some(user),
            None => self.users.find_by_email(username).await?,
        };

        let Some(user) = user else {
            return Err(AppError::authentication("Invalid username or password"));
        };

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Invalid username or password"));
        }

        if !user.can_login() {
            return Err(AppError::authorization("Account is inactive"));
        }

        let tokens = self.encoder.generate_token_pair(user.id, &user.username)?;

        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(LoginOutcome { user, tokens })
    }

    /// Logs out by blocklisting the current access token.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.decoder
            .blocklist_token(ctx.token_id, ctx.remaining_token_ttl_seconds())
            .await?;

        info!(user_id = %ctx.user_id, "User logged out");

        Ok(())
    }

    /// Exchanges a refresh token for a fresh token pair.
    ///
    /// The old refresh token is blocklisted so it cannot be replayed.
    pub async fn refresh(&self, refresh_token: &str) -> Result<LoginOutcome, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token).await?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;

        if !user.can_login() {
            return Err(AppError::authorization("Account is inactive"));
        }

        self.decoder
            .blocklist_token(claims.jti, claims.remaining_ttl_seconds())
            .await?;

        let tokens = self.encoder.generate_token_pair(user.id, &user.username)?;

        Ok(LoginOutcome { user, tokens })
    }

    /// Loads the current user's record.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("account no longer exists"))
    }
}
