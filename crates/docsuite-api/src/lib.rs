//! # docsuite-api
//!
//! HTTP API layer for DocSuite. Defines the Axum router, handlers,
//! extractors, DTOs, and the error-to-response mapping. All domain
//! logic lives in `docsuite-service`; handlers translate between HTTP
//! and service calls.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::run_server;
pub use error::ApiError;
pub use state::AppState;
