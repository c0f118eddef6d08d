//! HTTP request handlers.

pub mod admin;
pub mod auth;
pub mod document;
pub mod download;
pub mod group;
pub mod health;
pub mod invite;
pub mod permission;
pub mod role;
pub mod user;
