//! One repository per aggregate. Each holds a clone of the pool and owns
//! the SQL for its tables; services never see sqlx types.

use docsuite_core::error::{AppError, ErrorKind};

pub mod audit;
pub mod category;
pub mod document;
pub mod group;
pub mod invite;
pub mod permission;
pub mod role;
pub mod user;

pub use audit::PermissionAuditRepository;
pub use category::DocumentCategoryRepository;
pub use document::DocumentRepository;
pub use group::GroupRepository;
pub use invite::InviteRepository;
pub use permission::PermissionRepository;
pub use role::RoleRepository;
pub use user::UserRepository;

/// Map a sqlx error to `ErrorKind::Database`, tagging it with the failed
/// operation. Used as `.map_err(db_error("list users"))`.
pub(crate) fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, format!("{operation} failed"), e)
}

/// Like [`db_error`], but translates a named unique constraint into a
/// `Conflict` with a caller-supplied message.
pub(crate) fn db_error_unique(
    operation: &'static str,
    constraint: &'static str,
    conflict_message: String,
) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match &e {
        sqlx::Error::Database(db) if db.constraint() == Some(constraint) => {
            AppError::conflict(conflict_message)
        }
        _ => AppError::with_source(ErrorKind::Database, format!("{operation} failed"), e),
    }
}
