//! # docsuite-entity
//!
//! Domain entity models for the Business Smart Suite document service.
//! Every struct in this crate represents a database table row or a domain
//! value object. All entities derive `Debug`, `Clone`, `Serialize`,
//! `Deserialize`, and database entities additionally derive `sqlx::FromRow`.

pub mod audit;
pub mod document;
pub mod group;
pub mod invite;
pub mod permission;
pub mod role;
pub mod user;
