//! # docsuite-auth
//!
//! Authentication and authorization for DocSuite: JWT encoding and
//! validation, Argon2id password hashing, and the permission resolver
//! that turns stored grants into access decisions.

pub mod access;
pub mod jwt;
pub mod password;

pub use access::{Access, AccessSource, PermissionResolver};
pub use jwt::{Claims, InviteClaims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::PasswordHasher;
