//! Endpoint discovery across candidate backend routes.
//!
//! Self-hosted bot backends vary in route layout, so the connector
//! guesses several plausible shapes instead of requiring the route to be
//! configured. Candidates are tried strictly in order, each awaited to
//! completion before the next begins. The first success status wins and
//! later candidates are never consulted; its body is the reply even if
//! it is not envelope-shaped.

use botline_types::config::ConnectorConfig;
use botline_types::error::{ProbeError, TransportError};
use botline_types::message::{OutgoingMessage, ReplyEnvelope};
use botline_types::session::SessionId;

use crate::transport::BotTransport;

/// One guessed URL shape for the backend's message-send route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateRoute {
    /// Standard v1 conversation-scoped messages route.
    ConversationMessages,
    /// Direct bot-level messages route.
    BotMessages,
    /// Webhook-style delivery route.
    WebhookMessages,
    /// Minimal chat route used by older deployments.
    Chat,
}

impl CandidateRoute {
    /// All candidates, in probe order.
    pub const ALL: [CandidateRoute; 4] = [
        CandidateRoute::ConversationMessages,
        CandidateRoute::BotMessages,
        CandidateRoute::WebhookMessages,
        CandidateRoute::Chat,
    ];

    /// Interpolate this route's URL for a session.
    pub fn url(self, config: &ConnectorConfig, session: &SessionId) -> String {
        let base = &config.base_url;
        let bot = &config.bot_id;
        match self {
            CandidateRoute::ConversationMessages => {
                format!("{base}/api/v1/bots/{bot}/conversations/{session}/messages")
            }
            CandidateRoute::BotMessages => format!("{base}/api/v1/bots/{bot}/messages"),
            CandidateRoute::WebhookMessages => {
                format!("{base}/api/v1/bots/{bot}/webhooks/messages")
            }
            CandidateRoute::Chat => format!("{base}/api/bots/{bot}/chat"),
        }
    }
}

/// Result of a successful delivery: the reply plus the route that
/// produced it, so callers can cache the route for the session.
#[derive(Debug)]
pub struct Delivery {
    pub envelope: ReplyEnvelope,
    pub route: CandidateRoute,
}

/// Sends messages through the ordered candidate list.
pub struct EndpointProber {
    config: ConnectorConfig,
}

impl EndpointProber {
    /// Create a prober for one backend.
    pub fn new(config: ConnectorConfig) -> Self {
        Self { config }
    }

    /// Connection settings this prober interpolates into routes.
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Deliver `message` for `session`, trying every candidate in order.
    ///
    /// First success wins. Per-candidate failures are recorded and
    /// probing continues; only the last cause is retained for the
    /// exhaustion error.
    pub async fn send<T: BotTransport>(
        &self,
        transport: &T,
        session: &SessionId,
        message: &OutgoingMessage,
    ) -> Result<Delivery, ProbeError> {
        self.send_via(transport, session, message, &CandidateRoute::ALL)
            .await
    }

    /// Deliver through an explicit candidate list.
    ///
    /// Used to hit a session's cached route alone before falling back to
    /// full discovery.
    pub async fn send_via<T: BotTransport>(
        &self,
        transport: &T,
        session: &SessionId,
        message: &OutgoingMessage,
        routes: &[CandidateRoute],
    ) -> Result<Delivery, ProbeError> {
        let mut last_error: Option<TransportError> = None;

        for route in routes {
            let url = route.url(&self.config, session);
            tracing::debug!(%url, "Trying candidate endpoint");

            match transport
                .post_message(&url, message, self.config.bearer_token())
                .await
            {
                Ok(envelope) => {
                    tracing::debug!(%url, "Candidate endpoint accepted the message");
                    return Ok(Delivery {
                        envelope,
                        route: *route,
                    });
                }
                Err(err) => {
                    tracing::warn!(%url, error = %err, "Candidate endpoint failed, trying next");
                    last_error = Some(err);
                }
            }
        }

        let last = last_error.unwrap_or(TransportError::Network {
            url: self.config.base_url.clone(),
            message: "no candidate endpoints to try".to_string(),
        });
        tracing::warn!(error = %last, "All candidate endpoints exhausted");
        Err(ProbeError::BackendUnreachable(last))
    }

    /// URL of the primary messages route, used for history fetches.
    pub fn history_url(&self, session: &SessionId) -> String {
        CandidateRoute::ConversationMessages.url(&self.config, session)
    }
}
