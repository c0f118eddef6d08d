//! Log output settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    #[serde(default = "defaults::level")]
    pub level: String,
    /// `json` for machines, `pretty` for humans.
    #[serde(default = "defaults::format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::level(),
            format: defaults::format(),
        }
    }
}

mod defaults {
    pub fn level() -> String {
        "info".to_string()
    }
    pub fn format() -> String {
        "json".to_string()
    }
}
