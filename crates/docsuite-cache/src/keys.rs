//! Every cache key the application uses is built here, so an
//! invalidation pattern and the keys it must cover can't drift apart.

use uuid::Uuid;

/// Revoked-token marker. Present means the jti is blocked.
pub fn jwt_blocklist(jti: &str) -> String {
    format!("jwt:blocked:{jti}")
}

/// A resolved access decision for one (user, system, role) triple.
pub fn resolved_access(user_id: Uuid, system_id: &str, role: &str) -> String {
    format!("perm:{user_id}:{system_id}:{role}")
}

/// Matches every resolved decision for one user.
pub fn resolved_access_user_pattern(user_id: Uuid) -> String {
    format!("perm:{user_id}:*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_pattern_covers_decision_keys() {
        let uid = Uuid::nil();
        let key = resolved_access(uid, "policies", "read");
        let prefix = resolved_access_user_pattern(uid);
        assert!(key.starts_with(prefix.trim_end_matches('*')));
    }

    #[test]
    fn decision_keys_separate_systems_and_roles() {
        let uid = Uuid::nil();
        assert_ne!(
            resolved_access(uid, "policies", "read"),
            resolved_access(uid, "policies", "write")
        );
        assert_ne!(
            resolved_access(uid, "policies", "read"),
            resolved_access(uid, "forms", "read")
        );
    }
}
