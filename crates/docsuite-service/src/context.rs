//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Extracted from the validated access token and passed into service
/// methods so that every operation knows *who* is acting. The context
/// deliberately carries no role information; access is always resolved
/// against the permission store at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The username (convenience field from JWT claims).
    pub username: String,
    /// The access token's JWT ID, used for logout blocklisting.
    pub token_id: Uuid,
    /// When the access token expires.
    pub token_expires_at: DateTime<Utc>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        username: String,
        token_id: Uuid,
        token_expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            username,
            token_id,
            token_expires_at,
            request_time: Utc::now(),
        }
    }

    /// Remaining lifetime of the access token in seconds (0 if expired).
    pub fn remaining_token_ttl_seconds(&self) -> u64 {
        let remaining = (self.token_expires_at - Utc::now()).num_seconds();
        if remaining > 0 { remaining as u64 } else { 0 }
    }
}
