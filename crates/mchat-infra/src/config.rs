//! Service configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.mchat/` in
//! production) and deserializes it into [`ServiceConfig`]. Falls back to
//! defaults when the file is missing or malformed, then applies the
//! `MCHAT_API_URL` environment override.

use std::path::{Path, PathBuf};

use mchat_types::config::ServiceConfig;

/// Environment variable overriding the screening service base URL.
pub const ENV_API_URL: &str = "MCHAT_API_URL";

/// Default data directory: `~/.mchat`, or `./.mchat` when no home
/// directory can be resolved.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".mchat"))
        .unwrap_or_else(|| PathBuf::from(".mchat"))
}

/// Load service configuration from `{data_dir}/config.toml`.
///
/// - Missing file: defaults.
/// - Unreadable or unparsable file: warn and use defaults.
/// - `MCHAT_API_URL`, when set and non-empty, overrides `base_url`
///   regardless of the file's contents.
pub async fn load_service_config(data_dir: &Path) -> ServiceConfig {
    let config_path = data_dir.join("config.toml");

    let config = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<ServiceConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                ServiceConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    };

    apply_env_override(config, std::env::var(ENV_API_URL).ok())
}

fn apply_env_override(mut config: ServiceConfig, base_url: Option<String>) -> ServiceConfig {
    if let Some(url) = base_url {
        if !url.is_empty() {
            config.base_url = url;
        }
    }
    config
}
