//! HTTP server and CORS settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub host: String,
    #[serde(default = "defaults::port")]
    pub port: u16,
    #[serde(default = "defaults::request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "defaults::shutdown_grace")]
    pub shutdown_grace_seconds: u64,
    #[serde(default = "defaults::body_limit")]
    pub body_limit_mb: usize,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// `["*"]` is intended for development only.
    #[serde(default = "defaults::any")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "defaults::methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "defaults::any")]
    pub allowed_headers: Vec<String>,
    /// Preflight cache lifetime.
    #[serde(default = "defaults::cors_max_age")]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: defaults::any(),
            allowed_methods: defaults::methods(),
            allowed_headers: defaults::any(),
            max_age_seconds: defaults::cors_max_age(),
        }
    }
}

mod defaults {
    pub fn host() -> String {
        "0.0.0.0".to_string()
    }
    pub fn port() -> u16 {
        8080
    }
    pub fn request_timeout() -> u64 {
        30
    }
    pub fn shutdown_grace() -> u64 {
        30
    }
    pub fn body_limit() -> usize {
        16
    }
    pub fn any() -> Vec<String> {
        vec!["*".to_string()]
    }
    pub fn methods() -> Vec<String> {
        ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"]
            .iter()
            .map(|m| m.to_string())
            .collect()
    }
    pub fn cors_max_age() -> u64 {
        3600
    }
}
