//! Transport port for talking to one backend URL.

use botline_types::error::TransportError;
use botline_types::message::{OutgoingMessage, ReplyEnvelope};

/// Trait for HTTP delivery to a single backend URL.
///
/// Uses native async fn in traits (RPITIT). This is the seam between
/// conversation logic and the network: `botline-infra` provides the
/// reqwest-backed implementation, and tests substitute scripted stubs.
///
/// Implementations parse success bodies leniently -- a success status
/// whose body is not a reply envelope yields the empty envelope, which
/// the normalizer turns into a placeholder reply.
pub trait BotTransport: Send + Sync {
    /// POST one outgoing message to `url`.
    ///
    /// A success status yields the parsed reply envelope. A non-success
    /// status, a failed request, or a timed-out attempt yields a
    /// [`TransportError`].
    fn post_message(
        &self,
        url: &str,
        message: &OutgoingMessage,
        bearer_token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<ReplyEnvelope, TransportError>> + Send;

    /// GET the message log from a conversation URL.
    fn fetch_history(
        &self,
        url: &str,
        bearer_token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<ReplyEnvelope, TransportError>> + Send;
}
