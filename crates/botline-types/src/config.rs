//! Connection settings for a bot backend.
//!
//! `ConnectorConfig` carries the base URL, bot identifier, optional
//! bearer token, and the per-attempt deadline. All fields have defaults
//! pointing at a local unauthenticated deployment, so a missing or
//! partial configuration degrades rather than failing startup.

use serde::{Deserialize, Serialize};

/// Placeholder token value shipped in setup templates. Never sent as a
/// real bearer token.
pub const TOKEN_PLACEHOLDER: &str = "YOUR_BOT_TOKEN";

/// Connection settings for a bot backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bot identifier interpolated into every route.
    #[serde(default = "default_bot_id")]
    pub bot_id: String,

    /// Optional bearer token. Empty or placeholder values degrade to
    /// unauthenticated local requests.
    #[serde(default)]
    pub token: Option<String>,

    /// Per-attempt deadline in seconds. A timed-out attempt counts as an
    /// ordinary endpoint failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8075".to_string()
}

fn default_bot_id() -> String {
    "b656baaa-812f-47a3-8d04-4e57f8f6008c".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bot_id: default_bot_id(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ConnectorConfig {
    /// Bearer token to send, if a real one is configured.
    ///
    /// Empty strings and the setup placeholder count as "no token".
    pub fn bearer_token(&self) -> Option<&str> {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() && token != TOKEN_PLACEHOLDER => Some(token),
            _ => None,
        }
    }
}
