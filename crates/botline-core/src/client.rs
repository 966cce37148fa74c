//! Client facade tying session lifecycle, endpoint discovery, and reply
//! normalization together behind the frontend-facing contract.

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::warn;

use botline_types::config::ConnectorConfig;
use botline_types::message::{
    ChatExchange, ConnectionReport, DisplayMessage, OutgoingMessage,
};
use botline_types::session::SessionId;

use crate::fallback::{self, APOLOGY_TEXT};
use crate::normalize;
use crate::prober::EndpointProber;
use crate::session::SessionManager;
use crate::transport::BotTransport;

/// Conversation client for one bot backend.
///
/// An explicit value, not a process-wide singleton: construct one per
/// conversation and pass it down the call graph. Generic over the
/// transport so conversation logic stays testable without a live
/// backend.
///
/// All conversation state sits behind an async mutex. Overlapping calls
/// from multiple frontend triggers queue instead of interleaving session
/// mutation, so one exchange is in flight at a time.
pub struct ChatClient<T: BotTransport> {
    transport: T,
    prober: EndpointProber,
    state: Mutex<SessionManager>,
}

impl<T: BotTransport> ChatClient<T> {
    /// Create a client over the given transport.
    pub fn new(config: ConnectorConfig, transport: T) -> Self {
        Self {
            transport,
            prober: EndpointProber::new(config),
            state: Mutex::new(SessionManager::new()),
        }
    }

    /// Connection settings this client was built with.
    pub fn config(&self) -> &ConnectorConfig {
        self.prober.config()
    }

    /// Send one user message and return the normalized replies.
    ///
    /// Never fails: when every candidate endpoint is down the exchange
    /// carries the canned apology instead.
    ///
    /// The first send of a session probes the candidate routes and
    /// caches the winner on the session. Later sends go straight to the
    /// cached route and only re-probe the full list if it stops
    /// answering.
    pub async fn send_message(&self, text: &str) -> ChatExchange {
        let mut state = self.state.lock().await;
        let session = state.ensure();
        let message = OutgoingMessage::text(text, &session);

        // Cached route first, if discovery already ran for this session.
        if let Some(route) = state.resolved_route() {
            match self
                .prober
                .send_via(&self.transport, &session, &message, &[route])
                .await
            {
                Ok(delivery) => return Self::exchange(delivery.envelope, session),
                Err(err) => {
                    warn!(error = %err, "Cached route stopped answering, rediscovering");
                    state.clear_resolved_route();
                }
            }
        }

        match self.prober.send(&self.transport, &session, &message).await {
            Ok(delivery) => {
                state.set_resolved_route(delivery.route);
                Self::exchange(delivery.envelope, session)
            }
            Err(err) => {
                warn!(error = %err, "Message delivery failed, returning canned reply");
                ChatExchange {
                    messages: vec![fallback::unreachable_reply()],
                    session_id: session,
                    received_at: Utc::now(),
                }
            }
        }
    }

    fn exchange(
        envelope: botline_types::message::ReplyEnvelope,
        session: SessionId,
    ) -> ChatExchange {
        ChatExchange {
            messages: normalize::normalize(envelope),
            session_id: session,
            received_at: Utc::now(),
        }
    }

    /// Discard the current session unconditionally. Idempotent; does not
    /// notify the backend.
    pub async fn reset_session(&self) {
        self.state.lock().await.reset();
    }

    /// Session id of the conversation in progress, if any.
    pub async fn current_session_id(&self) -> Option<SessionId> {
        self.state.lock().await.current().cloned()
    }

    /// Fetch the message log for the current session.
    ///
    /// Returns an empty list when no session exists (without touching
    /// the network) and on any fetch failure. Callers cannot distinguish
    /// "no history" from "history unavailable".
    pub async fn conversation_history(&self) -> Vec<DisplayMessage> {
        let state = self.state.lock().await;
        let Some(session) = state.current().cloned() else {
            return Vec::new();
        };
        drop(state);

        let url = self.prober.history_url(&session);
        match self
            .transport
            .fetch_history(&url, self.config().bearer_token())
            .await
        {
            Ok(envelope) if envelope.responses.is_empty() => Vec::new(),
            Ok(envelope) => normalize::normalize(envelope),
            Err(err) => {
                warn!(error = %err, "History fetch failed, reporting empty history");
                Vec::new()
            }
        }
    }

    /// Send a probe message and report whether a genuine reply came
    /// back. A reply is genuine when it is not the canned apology from
    /// the unreachable-backend boundary.
    pub async fn test_connection(&self) -> ConnectionReport {
        let exchange = self.send_message("test").await;

        let genuine = exchange
            .messages
            .first()
            .is_some_and(|m| m.text != APOLOGY_TEXT);

        if genuine {
            ConnectionReport {
                success: true,
                error: None,
            }
        } else {
            ConnectionReport {
                success: false,
                error: Some("got canned reply instead of a backend response".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::EMPTY_REPLY_PLACEHOLDER;
    use crate::prober::CandidateRoute;
    use botline_types::error::TransportError;
    use botline_types::message::{ReplyEnvelope, ReplyItem, ReplyKind, ReplyPayload};

    use std::sync::Mutex as StdMutex;

    /// Scripted transport with swappable rules, so a test can change the
    /// backend's behavior between sends.
    struct StubTransport {
        rules: StdMutex<Vec<(String, StubOutcome)>>,
        posts: StdMutex<Vec<String>>,
        gets: StdMutex<Vec<String>>,
    }

    #[derive(Clone)]
    enum StubOutcome {
        Reply(ReplyEnvelope),
        Status(u16),
    }

    impl StubTransport {
        fn new(rules: Vec<(&str, StubOutcome)>) -> Self {
            Self {
                rules: StdMutex::new(
                    rules
                        .into_iter()
                        .map(|(fragment, outcome)| (fragment.to_string(), outcome))
                        .collect(),
                ),
                posts: StdMutex::new(Vec::new()),
                gets: StdMutex::new(Vec::new()),
            }
        }

        fn set_rules(&self, rules: Vec<(&str, StubOutcome)>) {
            *self.rules.lock().unwrap() = rules
                .into_iter()
                .map(|(fragment, outcome)| (fragment.to_string(), outcome))
                .collect();
        }

        fn posts(&self) -> Vec<String> {
            self.posts.lock().unwrap().clone()
        }

        fn post_count(&self) -> usize {
            self.posts.lock().unwrap().len()
        }

        fn gets(&self) -> Vec<String> {
            self.gets.lock().unwrap().clone()
        }

        fn outcome_for(&self, url: &str) -> StubOutcome {
            self.rules
                .lock()
                .unwrap()
                .iter()
                .find(|(fragment, _)| url.contains(fragment.as_str()))
                .map(|(_, outcome)| outcome.clone())
                .unwrap_or(StubOutcome::Status(404))
        }

        fn resolve(&self, url: &str) -> Result<ReplyEnvelope, TransportError> {
            match self.outcome_for(url) {
                StubOutcome::Reply(envelope) => Ok(envelope),
                StubOutcome::Status(status) => Err(TransportError::Status {
                    status,
                    url: url.to_string(),
                }),
            }
        }
    }

    impl BotTransport for StubTransport {
        async fn post_message(
            &self,
            url: &str,
            _message: &OutgoingMessage,
            _bearer_token: Option<&str>,
        ) -> Result<ReplyEnvelope, TransportError> {
            self.posts.lock().unwrap().push(url.to_string());
            self.resolve(url)
        }

        async fn fetch_history(
            &self,
            url: &str,
            _bearer_token: Option<&str>,
        ) -> Result<ReplyEnvelope, TransportError> {
            self.gets.lock().unwrap().push(url.to_string());
            self.resolve(url)
        }
    }

    fn text_envelope(text: &str) -> ReplyEnvelope {
        ReplyEnvelope {
            responses: vec![ReplyItem {
                kind: ReplyKind::Text,
                payload: ReplyPayload {
                    text: Some(text.to_string()),
                    ..ReplyPayload::default()
                },
            }],
            session_id: None,
        }
    }

    fn client(rules: Vec<(&str, StubOutcome)>) -> ChatClient<StubTransport> {
        ChatClient::new(ConnectorConfig::default(), StubTransport::new(rules))
    }

    #[tokio::test]
    async fn test_send_always_yields_at_least_one_message() {
        // Backend fully down: still resolves with the apology.
        let client = client(vec![]);
        let exchange = client.send_message("hello").await;
        assert!(!exchange.messages.is_empty());
    }

    #[tokio::test]
    async fn test_first_candidate_success_returns_reply() {
        let client = client(vec![(
            "/conversations/",
            StubOutcome::Reply(text_envelope("hi")),
        )]);

        let exchange = client.send_message("hello").await;
        assert_eq!(exchange.messages.len(), 1);
        assert_eq!(exchange.messages[0].text, "hi");
        // No further candidates tried after the first success.
        assert_eq!(client.transport.post_count(), 1);
    }

    #[tokio::test]
    async fn test_all_candidates_fail_yields_apology_in_order() {
        let client = client(vec![]);

        let exchange = client.send_message("hello").await;
        assert_eq!(exchange.messages.len(), 1);
        assert_eq!(exchange.messages[0].text, APOLOGY_TEXT);

        let posts = client.transport.posts();
        assert_eq!(posts.len(), CandidateRoute::ALL.len());
        assert!(posts[0].contains("/conversations/"));
        assert!(posts[1].ends_with("/messages"));
        assert!(posts[2].contains("/webhooks/"));
        assert!(posts[3].ends_with("/chat"));
    }

    #[tokio::test]
    async fn test_empty_reply_yields_single_placeholder() {
        let client = client(vec![(
            "/conversations/",
            StubOutcome::Reply(ReplyEnvelope::default()),
        )]);

        let exchange = client.send_message("hello").await;
        assert_eq!(exchange.messages.len(), 1);
        assert_eq!(exchange.messages[0].text, EMPTY_REPLY_PLACEHOLDER);
        assert_ne!(exchange.messages[0].text, APOLOGY_TEXT);
    }

    #[tokio::test]
    async fn test_session_persists_across_sends() {
        let client = client(vec![(
            "/conversations/",
            StubOutcome::Reply(text_envelope("hi")),
        )]);

        let first = client.send_message("one").await;
        let second = client.send_message("two").await;
        assert_eq!(first.session_id, second.session_id);
    }

    #[tokio::test]
    async fn test_reset_clears_session_and_next_send_differs() {
        let client = client(vec![(
            "/conversations/",
            StubOutcome::Reply(text_envelope("hi")),
        )]);

        let first = client.send_message("one").await;
        assert!(client.current_session_id().await.is_some());

        client.reset_session().await;
        assert!(client.current_session_id().await.is_none());

        let second = client.send_message("two").await;
        assert_ne!(first.session_id, second.session_id);
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let client = client(vec![]);
        client.send_message("one").await;

        client.reset_session().await;
        client.reset_session().await;
        assert!(client.current_session_id().await.is_none());
    }

    #[tokio::test]
    async fn test_history_without_session_issues_no_request() {
        let client = client(vec![]);
        let history = client.conversation_history().await;
        assert!(history.is_empty());
        assert!(client.transport.gets().is_empty());
        assert_eq!(client.transport.post_count(), 0);
    }

    #[tokio::test]
    async fn test_history_uses_primary_route() {
        let client = client(vec![(
            "/conversations/",
            StubOutcome::Reply(text_envelope("hi")),
        )]);

        client.send_message("one").await;
        let history = client.conversation_history().await;
        assert_eq!(history.len(), 1);

        let gets = client.transport.gets();
        assert_eq!(gets.len(), 1);
        assert!(gets[0].contains("/conversations/"));
        assert!(gets[0].ends_with("/messages"));
    }

    #[tokio::test]
    async fn test_history_failure_reports_empty() {
        let client = client(vec![(
            "/chat",
            StubOutcome::Reply(text_envelope("hi")),
        )]);

        // Discovery lands on /chat; the history route still 404s.
        client.send_message("one").await;
        let history = client.conversation_history().await;
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_discovered_route_is_cached_for_later_sends() {
        let client = client(vec![("/chat", StubOutcome::Reply(text_envelope("hi")))]);

        // Discovery walks all four candidates.
        client.send_message("one").await;
        assert_eq!(client.transport.post_count(), 4);

        // Cached route only.
        client.send_message("two").await;
        assert_eq!(client.transport.post_count(), 5);
        assert!(client.transport.posts()[4].ends_with("/chat"));
    }

    #[tokio::test]
    async fn test_cached_route_failure_triggers_rediscovery() {
        let client = client(vec![("/chat", StubOutcome::Reply(text_envelope("hi")))]);
        client.send_message("one").await;
        assert_eq!(client.transport.post_count(), 4);

        // The backend's layout changes: /chat goes away, the standard
        // route starts answering.
        client.transport.set_rules(vec![(
            "/conversations/",
            StubOutcome::Reply(text_envelope("back")),
        )]);

        let exchange = client.send_message("two").await;
        assert_eq!(exchange.messages[0].text, "back");
        // Cached /chat attempt, then rediscovery hits the first candidate.
        let posts = client.transport.posts();
        assert_eq!(posts.len(), 6);
        assert!(posts[4].ends_with("/chat"));
        assert!(posts[5].contains("/conversations/"));

        // The fresh winner is cached again.
        client.send_message("three").await;
        assert_eq!(client.transport.post_count(), 7);
        assert!(client.transport.posts()[6].contains("/conversations/"));
    }

    #[tokio::test]
    async fn test_reset_drops_cached_route() {
        let client = client(vec![("/chat", StubOutcome::Reply(text_envelope("hi")))]);
        client.send_message("one").await;
        client.reset_session().await;

        // Fresh session probes from the top again.
        client.send_message("two").await;
        assert_eq!(client.transport.post_count(), 8);
    }

    #[tokio::test]
    async fn test_connection_report_success() {
        let client = client(vec![(
            "/conversations/",
            StubOutcome::Reply(text_envelope("pong")),
        )]);

        let report = client.test_connection().await;
        assert!(report.success);
        assert!(report.error.is_none());
    }

    #[tokio::test]
    async fn test_connection_report_failure_on_canned_reply() {
        let client = client(vec![]);

        let report = client.test_connection().await;
        assert!(!report.success);
        assert!(report.error.is_some());
    }
}
