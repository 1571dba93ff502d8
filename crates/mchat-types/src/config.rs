//! Client configuration for reaching the screening service.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Network location and timeout for the remote screening service.
///
/// Loaded from `config.toml` in the data directory; every field has a
/// default so a partial (or absent) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base address of the screening service HTTP API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Client-side timeout applied to every request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
