//! Session lifecycle for a single conversation.
//!
//! Owns the conversation's session id and the route cached by endpoint
//! discovery. The id is created lazily on first use and discarded on
//! reset; there is no backend teardown call.

use botline_types::session::SessionId;

use crate::prober::CandidateRoute;

/// Tracks the session id and discovery state of one conversation.
///
/// At most one session id is active at a time. Resetting discards it
/// unconditionally together with the cached route.
#[derive(Debug, Default)]
pub struct SessionManager {
    session_id: Option<SessionId>,
    /// Route that answered the discovery probe for this session.
    resolved_route: Option<CandidateRoute>,
}

impl SessionManager {
    /// Create a manager with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session id, generating one if absent.
    pub fn ensure(&mut self) -> SessionId {
        if let Some(id) = &self.session_id {
            return id.clone();
        }
        let id = SessionId::generate();
        tracing::info!(session_id = %id, "Started new conversation session");
        self.session_id = Some(id.clone());
        id
    }

    /// Current session id, if any.
    pub fn current(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Route cached by discovery for this session, if any.
    pub fn resolved_route(&self) -> Option<CandidateRoute> {
        self.resolved_route
    }

    /// Cache the route that won discovery.
    pub fn set_resolved_route(&mut self, route: CandidateRoute) {
        self.resolved_route = Some(route);
    }

    /// Forget the cached route so the next send re-probes.
    pub fn clear_resolved_route(&mut self) {
        self.resolved_route = None;
    }

    /// Discard the session unconditionally.
    ///
    /// Idempotent. The next `ensure` starts a fresh conversation with a
    /// new id and no cached route.
    pub fn reset(&mut self) {
        if let Some(id) = self.session_id.take() {
            tracing::info!(session_id = %id, "Session reset");
        }
        self.resolved_route = None;
    }
}
