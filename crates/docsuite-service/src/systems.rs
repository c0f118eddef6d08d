//! Permission system ids and role names for the administrative surfaces.
//!
//! Document routes derive their system id from the document kind; the
//! admin surfaces below use fixed ids.

/// User administration.
pub const USERS: &str = "users";
/// Group administration.
pub const GROUPS: &str = "groups";
/// Permission and role administration.
pub const PERMISSIONS: &str = "permissions";
/// Audit log access.
pub const AUDIT: &str = "audit";

/// Read access to a system.
pub const ROLE_READ: &str = "read";
/// Write (create/update) access to a system.
pub const ROLE_WRITE: &str = "write";
/// Delete access to a system.
pub const ROLE_DELETE: &str = "delete";
