//! Wire shapes for outgoing JSON bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docsuite_core::types::pagination::PageResponse;
use docsuite_entity::user::User;

/// Envelope for every successful response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Page of items plus the bookkeeping a client needs to render a pager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T: Serialize> From<PageResponse<T>> for PaginatedResponse<T> {
    fn from(page: PageResponse<T>) -> Self {
        Self {
            items: page.items,
            total: page.total_items,
            page: page.page,
            per_page: page.page_size,
            total_pages: page.total_pages,
            has_next: page.has_next,
            has_previous: page.has_previous,
        }
    }
}

/// Both token families plus the authenticated account, returned by
/// login, refresh and invite acceptance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

/// Public view of an account. Deliberately omits the password hash and
/// audit columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            status: user.status.to_string(),
            created_at: user.created_at,
        }
    }
}

/// Plain confirmation text for operations with no natural payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// How many rows a bulk action touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatedCountResponse {
    pub updated: u64,
}

/// A freshly created invite. The token is handed back to the caller for
/// out-of-band delivery; it is never stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteResponse {
    pub id: Uuid,
    pub email: String,
    pub role_name: String,
    pub token: String,
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness probe body with per-backend verdicts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    pub status: String,
    pub database: String,
    pub cache: String,
}
