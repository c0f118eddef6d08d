//! End-to-end tests driven through the HTTP router.
//!
//! These tests need a reachable PostgreSQL instance (see
//! `config/default.toml`, overridable via `config/test.toml` or
//! `DOCSUITE__DATABASE__URL`). When the database is unreachable each
//! test skips itself instead of failing.

mod helpers;

mod auth_test;
mod document_test;
mod group_test;
mod invite_test;
mod permission_test;
