//! Connector configuration loading.
//!
//! Settings come from an optional TOML file overlaid with environment
//! variables, on top of compiled-in defaults. Absence of any setting
//! degrades to unauthenticated localhost requests rather than failing
//! startup.

use std::path::Path;

use botline_types::config::ConnectorConfig;

const ENV_BASE_URL: &str = "BOTLINE_BASE_URL";
const ENV_BOT_ID: &str = "BOTLINE_BOT_ID";
const ENV_TOKEN: &str = "BOTLINE_TOKEN";
const ENV_TIMEOUT_SECS: &str = "BOTLINE_TIMEOUT_SECS";

/// Load configuration from an optional TOML file plus the environment.
///
/// File values override defaults; environment variables override both.
/// A missing file yields defaults. A malformed file logs a warning and
/// yields defaults.
pub async fn load_config(path: Option<&Path>) -> ConnectorConfig {
    let mut config = match path {
        Some(path) => load_file(path).await,
        None => ConnectorConfig::default(),
    };

    if let Some(base_url) = env_var(ENV_BASE_URL) {
        config.base_url = base_url;
    }
    if let Some(bot_id) = env_var(ENV_BOT_ID) {
        config.bot_id = bot_id;
    }
    if let Some(token) = env_var(ENV_TOKEN) {
        config.token = Some(token);
    }
    if let Some(timeout) = env_var(ENV_TIMEOUT_SECS) {
        match timeout.parse() {
            Ok(secs) => config.timeout_secs = secs,
            Err(_) => {
                tracing::warn!(value = %timeout, "Ignoring non-numeric {ENV_TIMEOUT_SECS}")
            }
        }
    }

    config
}

async fn load_file(path: &Path) -> ConnectorConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return ConnectorConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ConnectorConfig::default();
        }
    };

    match toml::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ConnectorConfig::default()
        }
    }
}

/// Read an env var, treating absent and non-unicode values as unset.
fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(val) => Some(val),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => None,
    }
}
