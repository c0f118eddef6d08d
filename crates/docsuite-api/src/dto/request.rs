//! Wire shapes for incoming JSON bodies and query strings.
//!
//! Validation rules live on the DTOs themselves; handlers call
//! [`validator::Validate::validate`] on the deserialized payload before
//! any service code runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Accepts a username or an email address.
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// Self-service profile edit. Absent fields are left as they are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Admin-side account provisioning.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub display_name: Option<String>,
}

/// Admin-side edit of someone else's account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    /// `"active"` or `"inactive"`.
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    /// Members enrolled in the same transaction as the group itself.
    #[serde(default)]
    pub initial_user_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
}

/// Grant body shared by user grants and group grants.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GrantPermissionRequest {
    /// `*` grants across every system.
    #[validate(length(min = 1))]
    pub system_id: String,
    pub role_id: Uuid,
    /// RFC 3339 timestamp; omit for a grant that never lapses.
    pub expiry: Option<String>,
}

/// Query string for `GET /permissions/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAccessQuery {
    pub system: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub system_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInviteRequest {
    #[validate(email)]
    pub email: String,
    /// Role granted the moment the invite is accepted.
    #[validate(length(min = 1))]
    pub role_name: String,
}

/// Query string for `GET /accept-invite`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptInviteQuery {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub attachment_path: Option<String>,
    pub review_date: Option<NaiveDate>,
}

/// Document edit; absent fields are left as they are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub attachment_path: Option<String>,
    pub review_date: Option<NaiveDate>,
}

/// Query string for document listings. `?archived=true` widens the
/// listing to archived records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListQuery {
    pub category_id: Option<Uuid>,
    #[serde(default, alias = "archived")]
    pub include_archived: bool,
}

/// One flag action applied to many documents at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkActionRequest {
    pub ids: Vec<Uuid>,
    /// One of `archive`, `unarchive`, `approve`, `unapprove`,
    /// `highlight`, `unhighlight`.
    pub action: String,
}

/// One action applied to a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleActionRequest {
    /// Any bulk action name, plus `toggle_highlight`, `move_up` and
    /// `move_down`.
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDocumentQuery {
    /// When set, hard-delete instead of archiving.
    #[serde(default)]
    pub permanent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListQuery {
    #[serde(default, alias = "archived")]
    pub include_archived: bool,
}

/// Publish a new revision of an approved document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishVersionRequest {
    pub notes: Option<String>,
    pub attachment_path: Option<String>,
}

/// Audit log filters; all optional and combinable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSearchQuery {
    pub actor_id: Option<Uuid>,
    pub action: Option<String>,
    pub user_id: Option<Uuid>,
}

/// Free-text filter over username, display name and email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSearchQuery {
    pub search: Option<String>,
}
