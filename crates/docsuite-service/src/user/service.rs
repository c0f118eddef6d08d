//! Self-service account operations: own profile, own groups, own
//! password. Nothing here needs a permission check beyond a valid
//! session.

use std::sync::Arc;

use tracing::info;

use docsuite_auth::password::PasswordHasher;
use docsuite_core::error::AppError;
use docsuite_database::repositories::{GroupRepository, UserRepository};
use docsuite_entity::group::model::Group;
use docsuite_entity::user::User;
use docsuite_entity::user::model::UpdateUser;

use crate::context::RequestContext;

#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    groups: Arc<GroupRepository>,
    hasher: Arc<PasswordHasher>,
    password_min_length: usize,
}

/// Profile edit from the account owner. `None` fields stay untouched.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl UserService {
    pub fn new(
        users: Arc<UserRepository>,
        groups: Arc<GroupRepository>,
        hasher: Arc<PasswordHasher>,
        password_min_length: usize,
    ) -> Self {
        Self {
            users,
            groups,
            hasher,
            password_min_length,
        }
    }

    /// The caller's own account row.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        let user = self.users.find_by_id(ctx.user_id).await?;
        user.ok_or_else(|| AppError::not_found("account no longer exists"))
    }

    /// Groups the caller currently belongs to.
    pub async fn my_groups(&self, ctx: &RequestContext) -> Result<Vec<Group>, AppError> {
        self.groups.find_groups_for_user(ctx.user_id).await
    }

    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        if matches!(&req.display_name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::validation("display name must not be blank"));
        }
        if let Some(email) = &req.email {
            validate_email(email)?;
        }

        let changes = UpdateUser {
            id: ctx.user_id,
            email: req.email,
            display_name: req.display_name,
        };
        let user = self.users.update(&changes).await?;

        info!(user_id = %ctx.user_id, "profile updated");
        Ok(user)
    }

    /// Rotates the caller's password after re-verifying the current one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get_profile(ctx).await?;

        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::authentication("current password is wrong"));
        }

        validate_password(new_password, self.password_min_length)?;
        if current_password == new_password {
            return Err(AppError::validation(
                "new password must differ from the current one",
            ));
        }

        let new_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(ctx.user_id, &new_hash).await?;

        info!(user_id = %ctx.user_id, "password changed");
        Ok(())
    }
}

/// Structural sanity check only; deliverability is not our problem here.
pub(crate) fn validate_email(email: &str) -> Result<(), AppError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') || trimmed.starts_with('@') {
        return Err(AppError::validation("email address is malformed"));
    }
    Ok(())
}

pub(crate) fn validate_password(password: &str, min_length: usize) -> Result<(), AppError> {
    if password.chars().count() < min_length {
        return Err(AppError::validation(format!(
            "password must be at least {min_length} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_email, validate_password};

    #[test]
    fn rejects_malformed_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@host").is_err());
        assert!(validate_email("alice@example.com").is_ok());
    }

    #[test]
    fn enforces_minimum_password_length() {
        assert!(validate_password("short", 8).is_err());
        assert!(validate_password("long enough", 8).is_ok());
    }
}
