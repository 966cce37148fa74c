//! Reqwest-backed transport for the bot backend.
//!
//! One `HttpTransport` wraps a shared `reqwest::Client` configured with
//! the per-attempt deadline, so a hung endpoint surfaces as an ordinary
//! failed attempt instead of stalling the probe sequence. Response
//! bodies are parsed leniently: a success status whose body is not a
//! reply envelope maps to the empty envelope rather than an error.

use std::time::Duration;

use botline_core::transport::BotTransport;
use botline_types::error::TransportError;
use botline_types::message::{OutgoingMessage, ReplyEnvelope};

/// HTTP delivery via reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Create a transport with the given per-attempt deadline in seconds.
    pub fn new(timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to create reqwest client");
        Self {
            client,
            timeout_secs,
        }
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout_secs,
            }
        } else {
            TransportError::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Parse a response body as a reply envelope.
    ///
    /// Bodies that are not envelope-shaped JSON (health-check pages,
    /// plain-text acks) map to the empty envelope; the normalizer turns
    /// that into a placeholder reply.
    fn parse_envelope(url: &str, body: &str) -> ReplyEnvelope {
        match serde_json::from_str(body) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::debug!(
                    %url,
                    error = %err,
                    "Reply body is not a reply envelope, treating as empty"
                );
                ReplyEnvelope::default()
            }
        }
    }

    async fn read_envelope(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<ReplyEnvelope, TransportError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| self.classify(url, err))?;
        Ok(Self::parse_envelope(url, &body))
    }
}

impl BotTransport for HttpTransport {
    async fn post_message(
        &self,
        url: &str,
        message: &OutgoingMessage,
        bearer_token: Option<&str>,
    ) -> Result<ReplyEnvelope, TransportError> {
        let mut request = self.client.post(url).json(message);
        if let Some(token) = bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| self.classify(url, err))?;
        self.read_envelope(url, response).await
    }

    async fn fetch_history(
        &self,
        url: &str,
        bearer_token: Option<&str>,
    ) -> Result<ReplyEnvelope, TransportError> {
        let mut request = self.client.get(url);
        if let Some(token) = bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| self.classify(url, err))?;
        self.read_envelope(url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope_valid_body() {
        let body = r#"{"responses":[{"type":"text","payload":{"text":"hi"}}]}"#;
        let envelope = HttpTransport::parse_envelope("http://test", body);
        assert_eq!(envelope.responses.len(), 1);
        assert_eq!(envelope.responses[0].payload.text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_parse_envelope_unrelated_json_is_empty() {
        // A health-check 200 with an unrelated body still wins probing;
        // its body degrades to the empty envelope.
        let envelope = HttpTransport::parse_envelope("http://test", r#"{"status":"ok"}"#);
        assert!(envelope.responses.is_empty());
    }

    #[test]
    fn test_parse_envelope_non_json_is_empty() {
        let envelope = HttpTransport::parse_envelope("http://test", "<html>OK</html>");
        assert!(envelope.responses.is_empty());
    }

    #[test]
    fn test_transport_construction() {
        let transport = HttpTransport::new(3);
        assert_eq!(transport.timeout_secs, 3);
    }
}
