//! Infrastructure for the Botline connector: the reqwest-backed
//! transport and configuration loading.

pub mod config;
pub mod http;

use botline_core::client::ChatClient;
use botline_types::config::ConnectorConfig;

use crate::http::HttpTransport;

/// Build a ready-to-use client from connection settings.
pub fn build_client(config: ConnectorConfig) -> ChatClient<HttpTransport> {
    let transport = HttpTransport::new(config.timeout_secs);
    ChatClient::new(config, transport)
}
