//! # docsuite-service
//!
//! Business logic service layer for DocSuite. Each service orchestrates
//! repositories, cache, and authentication to implement application-level
//! use cases, and performs its own access checks through the permission
//! resolver.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod audit;
pub mod auth;
pub mod context;
pub mod document;
pub mod group;
pub mod invite;
pub mod permission;
pub mod role;
pub mod systems;
pub mod user;

pub use audit::AuditService;
pub use auth::AuthService;
pub use context::RequestContext;
pub use document::{DocumentService, DownloadService};
pub use group::GroupService;
pub use invite::InviteService;
pub use permission::PermissionService;
pub use role::RoleService;
pub use user::{AdminUserService, UserService};
