//! Issue invites and accept them exactly once.
//!
//! An invite is a signed token emailed out of band. Acceptance creates
//! the invited user (or reconciles an existing account with the same
//! email), consumes the invite atomically, and grants the named role.

use std::sync::Arc;

use rand::RngExt;
use rand::distr::Alphanumeric;
use tracing::info;
use uuid::Uuid;

use docsuite_auth::jwt::{JwtDecoder, JwtEncoder};
use docsuite_auth::password::PasswordHasher;
use docsuite_auth::PermissionResolver;
use docsuite_core::error::{AppError, ErrorKind};
use docsuite_database::repositories::{
    InviteRepository, PermissionAuditRepository, PermissionRepository, RoleRepository,
    UserRepository,
};
use docsuite_entity::audit::AuditAction;
use docsuite_entity::audit::model::CreatePermissionAudit;
use docsuite_entity::invite::model::{CreateInvite, Invite};
use docsuite_entity::invite::InviteStatus;
use docsuite_entity::permission::model::CreatePermission;
use docsuite_entity::role::model::WILDCARD_SYSTEM;
use docsuite_entity::user::model::CreateUser;
use docsuite_entity::user::User;

use crate::context::RequestContext;
use crate::systems;
use crate::user::service::validate_email;

/// Length of the provisional password set on invite-created accounts.
/// The invited person is expected to change it after first login.
const PROVISIONAL_PASSWORD_LEN: usize = 24;

/// Result of issuing an invite.
#[derive(Debug, Clone, serde::Serialize)]
pub struct InviteOutcome {
    /// The stored invite record.
    pub invite: Invite,
    /// The signed acceptance token to deliver to the invitee.
    pub token: String,
}

/// Issues and accepts invitations.
#[derive(Debug, Clone)]
pub struct InviteService {
    /// Invite repository.
    invites: Arc<InviteRepository>,
    /// User repository.
    users: Arc<UserRepository>,
    /// Role repository.
    roles: Arc<RoleRepository>,
    /// Permission repository (role grant on acceptance).
    permissions: Arc<PermissionRepository>,
    /// Audit log repository.
    audit: Arc<PermissionAuditRepository>,
    /// Password hasher (provisional passwords).
    hasher: Arc<PasswordHasher>,
    /// Token encoder (invite tokens).
    encoder: Arc<JwtEncoder>,
    /// Token decoder (invite tokens).
    decoder: Arc<JwtDecoder>,
    /// Permission resolver for access checks and invalidation.
    resolver: Arc<PermissionResolver>,
}

impl InviteService {
    /// Creates a new invite service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        invites: Arc<InviteRepository>,
        users: Arc<UserRepository>,
        roles: Arc<RoleRepository>,
        permissions: Arc<PermissionRepository>,
        audit: Arc<PermissionAuditRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        resolver: Arc<PermissionResolver>,
    ) -> Self {
        Self {
            invites,
            users,
            roles,
            permissions,
            audit,
            hasher,
            encoder,
            decoder,
            resolver,
        }
    }

    /// Issues an invite for an email address, granting `role_name` on
    /// acceptance. Returns the signed token for out-of-band delivery.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        email: String,
        role_name: String,
    ) -> Result<InviteOutcome, AppError> {
        self.resolver
            .require(ctx.user_id, systems::USERS, systems::ROLE_WRITE)
            .await?;

        validate_email(&email)?;
        let role = self
            .roles
            .find_by_name(&role_name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Role '{role_name}' not found")))?;

        let invite = self
            .invites
            .create(&CreateInvite {
                email: email.clone(),
                role_name: role.name.clone(),
                invited_by: ctx.user_id,
            })
            .await?;

        let token = self.encoder.generate_invite_token(invite.id, &email)?;

        self.record(
            ctx.user_id,
            AuditAction::InviteCreated,
            None,
            serde_json::json!({ "invite_id": invite.id, "email": email, "role": role.name }),
        )
        .await;

        info!(actor_id = %ctx.user_id, invite_id = %invite.id, "Invite created");

        Ok(InviteOutcome { invite, token })
    }

    /// Accepts an invite token. Public — the invitee has no account yet.
    ///
    /// Token expiry is enforced by signature validation; consumption is
    /// a conditional update, so concurrent acceptances of the same
    /// invite resolve to exactly one winner.
    pub async fn accept(&self, token: &str) -> Result<User, AppError> {
        let claims = self.decoder.decode_invite_token(token)?;

        let invite = self
            .invites
            .find_by_id(claims.invite_id())
            .await?
            .ok_or_else(|| AppError::not_found("Invite not found"))?;

        if invite.status != InviteStatus::Pending {
            return Err(AppError::conflict("Invite has already been accepted"));
        }

        let user = match self.users.find_by_email(&invite.email).await? {
            Some(existing) => existing,
            None => self.provision_user(&invite).await?,
        };

        let consumed = self
            .invites
            .mark_accepted(invite.id, user.id)
            .await?
            .ok_or_else(|| AppError::conflict("Invite has already been accepted"))?;

        self.grant_invited_role(&consumed, user.id).await?;

        self.record(
            consumed.invited_by,
            AuditAction::InviteAccepted,
            Some(user.id),
            serde_json::json!({ "invite_id": consumed.id, "role": consumed.role_name }),
        )
        .await;
        self.resolver.invalidate_user(user.id).await?;

        info!(invite_id = %consumed.id, user_id = %user.id, "Invite accepted");

        Ok(user)
    }

    /// Creates the invited user with a random provisional password.
    async fn provision_user(&self, invite: &Invite) -> Result<User, AppError> {
        let provisional: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(PROVISIONAL_PASSWORD_LEN)
            .map(char::from)
            .collect();
        let password_hash = self.hasher.hash_password(&provisional)?;

        let local_part = invite.email.split('@').next().unwrap_or(&invite.email);
        let username = match self.users.find_by_username(local_part).await? {
            None => local_part.to_string(),
            // Local part taken by a different account; disambiguate.
            Some(_) => format!("{local_part}-{}", &Uuid::new_v4().simple().to_string()[..8]),
        };

        self.users
            .create(&CreateUser {
                email: invite.email.clone(),
                username,
                password_hash,
                display_name: None,
                created_by: Some(invite.invited_by),
            })
            .await
    }

    /// Grants the invite's role to the accepted user. A role the user
    /// already holds is fine; anything else propagates.
    async fn grant_invited_role(&self, invite: &Invite, user_id: Uuid) -> Result<(), AppError> {
        let role = self
            .roles
            .find_by_name(&invite.role_name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Role '{}' not found", invite.role_name))
            })?;

        let system_id = role
            .system_id
            .clone()
            .unwrap_or_else(|| WILDCARD_SYSTEM.to_string());

        let result = self
            .permissions
            .create(&CreatePermission {
                user_id,
                system_id,
                role_id: role.id,
                expiry: None,
                granted_by: Some(invite.invited_by),
            })
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.kind == ErrorKind::Conflict => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Appends an audit entry; failures are logged, not propagated.
    async fn record(
        &self,
        actor_id: Uuid,
        action: AuditAction,
        user_id: Option<Uuid>,
        details: serde_json::Value,
    ) {
        let entry = CreatePermissionAudit {
            action: action.as_str().to_string(),
            user_id,
            group_id: None,
            system_id: None,
            role_id: None,
            actor_id,
            details: Some(details),
        };
        if let Err(e) = self.audit.create(&entry).await {
            tracing::warn!(action = %action, error = %e, "Failed to write audit entry");
        }
    }
}
