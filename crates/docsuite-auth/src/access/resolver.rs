//! The permission resolver: stored grants in, access decision out.
//!
//! Resolution unions the caller's active direct grants with the grants
//! of every group they belong to, scoped to the requested system or the
//! `*` wildcard. The decision is allowed when the union contains the
//! required role, or the `Admin` override role. Expiry is enforced by
//! the repository queries; an expired grant never reaches this module.
//!
//! Decisions are cached for a short TTL and invalidated whenever a
//! grant, revocation, or membership change could affect the user, so a
//! revoked permission takes effect within seconds.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use docsuite_cache::keys;
use docsuite_cache::provider::CacheManager;
use docsuite_core::error::AppError;
use docsuite_core::traits::CacheProvider;
use docsuite_database::repositories::PermissionRepository;
use docsuite_entity::role::model::ADMIN_ROLE;

/// Result of resolving access for a user in a system.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Access {
    /// Whether access is granted.
    pub allowed: bool,
    /// The role names that justified the decision.
    pub matched_roles: Vec<String>,
    /// Where the decision came from.
    pub source: AccessSource,
}

/// Where an access decision was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessSource {
    /// A direct grant to the user matched the required role.
    Direct,
    /// A grant to one of the user's groups matched the required role.
    Group,
    /// The `Admin` override role short-circuited the check.
    AdminOverride,
    /// No applicable grant was found.
    Denied,
}

impl Access {
    /// A denied decision.
    pub fn denied() -> Self {
        Self {
            allowed: false,
            matched_roles: Vec::new(),
            source: AccessSource::Denied,
        }
    }
}

/// Decide access from the loaded role-name sets.
///
/// Pure function so the decision table is testable without a database.
pub fn decide(direct_roles: &[String], group_roles: &[String], required_role: &str) -> Access {
    if direct_roles.iter().any(|r| r == required_role) {
        return Access {
            allowed: true,
            matched_roles: vec![required_role.to_string()],
            source: AccessSource::Direct,
        };
    }

    if group_roles.iter().any(|r| r == required_role) {
        return Access {
            allowed: true,
            matched_roles: vec![required_role.to_string()],
            source: AccessSource::Group,
        };
    }

    if direct_roles
        .iter()
        .chain(group_roles.iter())
        .any(|r| r == ADMIN_ROLE)
    {
        return Access {
            allowed: true,
            matched_roles: vec![ADMIN_ROLE.to_string()],
            source: AccessSource::AdminOverride,
        };
    }

    Access::denied()
}

/// Resolves effective access for users, with short-TTL caching.
#[derive(Clone)]
pub struct PermissionResolver {
    /// Permission store queries.
    permissions: Arc<PermissionRepository>,
    /// Cache for resolved decisions.
    cache: Arc<CacheManager>,
    /// How long a resolved decision may be served from cache.
    cache_ttl: Duration,
}

impl std::fmt::Debug for PermissionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionResolver")
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl PermissionResolver {
    /// Creates a new resolver.
    pub fn new(
        permissions: Arc<PermissionRepository>,
        cache: Arc<CacheManager>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            permissions,
            cache,
            cache_ttl: Duration::from_secs(cache_ttl_seconds),
        }
    }

    /// Resolves whether `user_id` holds `required_role` in `system_id`.
    ///
    /// Read-only: resolution never mutates stored permissions, even for
    /// grants that have lapsed.
    pub async fn resolve(
        &self,
        user_id: Uuid,
        system_id: &str,
        required_role: &str,
    ) -> Result<Access, AppError> {
        let cache_key = keys::resolved_access(user_id, system_id, required_role);

        if let Ok(Some(cached)) = self.cache.get(&cache_key).await {
            if let Ok(access) = serde_json::from_str::<Access>(&cached) {
                return Ok(access);
            }
        }

        let direct = self
            .permissions
            .active_role_names_for_user(user_id, system_id)
            .await?;
        let via_groups = self
            .permissions
            .active_group_role_names_for_user(user_id, system_id)
            .await?;

        let access = decide(&direct, &via_groups, required_role);
        tracing::debug!(
            %user_id,
            system_id,
            required_role,
            allowed = access.allowed,
            source = ?access.source,
            "resolved access"
        );

        if let Ok(serialized) = serde_json::to_string(&access) {
            let _ = self.cache.set(&cache_key, &serialized, self.cache_ttl).await;
        }

        Ok(access)
    }

    /// Resolves and returns an authorization error on a denied decision.
    pub async fn require(
        &self,
        user_id: Uuid,
        system_id: &str,
        required_role: &str,
    ) -> Result<Access, AppError> {
        let access = self.resolve(user_id, system_id, required_role).await?;
        if !access.allowed {
            return Err(AppError::authorization(format!(
                "missing '{required_role}' role for system '{system_id}'"
            )));
        }
        Ok(access)
    }

    /// Drops every cached decision for one user.
    pub async fn invalidate_user(&self, user_id: Uuid) -> Result<(), AppError> {
        let pattern = keys::resolved_access_user_pattern(user_id);
        let _ = self.cache.delete_pattern(&pattern).await;
        tracing::debug!(%user_id, "invalidated cached access decisions");
        Ok(())
    }

    /// Drops cached decisions for every member of a group.
    pub async fn invalidate_group(&self, group_id: Uuid) -> Result<(), AppError> {
        let member_ids = self.permissions.member_ids_of_group(group_id).await?;
        for user_id in member_ids {
            self.invalidate_user(user_id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn direct_grant_allows() {
        let access = decide(&roles(&["read"]), &[], "read");
        assert!(access.allowed);
        assert_eq!(access.source, AccessSource::Direct);
        assert_eq!(access.matched_roles, vec!["read"]);
    }

    #[test]
    fn group_grant_allows() {
        let access = decide(&[], &roles(&["write"]), "write");
        assert!(access.allowed);
        assert_eq!(access.source, AccessSource::Group);
    }

    #[test]
    fn admin_override_allows_any_role() {
        let access = decide(&roles(&["Admin"]), &[], "delete");
        assert!(access.allowed);
        assert_eq!(access.source, AccessSource::AdminOverride);
        assert_eq!(access.matched_roles, vec!["Admin"]);
    }

    #[test]
    fn direct_match_wins_over_admin_override() {
        let access = decide(&roles(&["Admin", "read"]), &[], "read");
        assert_eq!(access.source, AccessSource::Direct);
    }

    #[test]
    fn no_roles_is_denied() {
        let access = decide(&[], &[], "read");
        assert!(!access.allowed);
        assert_eq!(access.source, AccessSource::Denied);
        assert!(access.matched_roles.is_empty());
    }

    #[test]
    fn other_roles_do_not_satisfy() {
        let access = decide(&roles(&["read"]), &roles(&["write"]), "delete");
        assert!(!access.allowed);
    }

    #[test]
    fn role_names_are_case_sensitive() {
        let access = decide(&roles(&["Read"]), &[], "read");
        assert!(!access.allowed);
    }
}
