//! Bearer-token extractor. Any handler taking [`AuthUser`] only runs
//! with a verified, unrevoked access token behind it.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use docsuite_core::error::AppError;
use docsuite_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::authentication("missing or malformed bearer token"))?;

        let claims = state.jwt_decoder.decode_access_token(token).await?;

        Ok(AuthUser(RequestContext::new(
            claims.user_id(),
            claims.username.clone(),
            claims.jti,
            claims.expires_at(),
        )))
    }
}
