//! Attachment upload configuration.

use serde::{Deserialize, Serialize};

/// Settings for document attachment storage on the local filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsConfig {
    /// Root directory for stored attachments. Download paths resolve
    /// strictly underneath this directory.
    #[serde(default = "default_root")]
    pub root: String,
    /// Maximum attachment size in megabytes.
    #[serde(default = "default_max_size")]
    pub max_size_mb: u64,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            max_size_mb: default_max_size(),
        }
    }
}

fn default_root() -> String {
    "data/uploads".to_string()
}

fn default_max_size() -> u64 {
    50
}
