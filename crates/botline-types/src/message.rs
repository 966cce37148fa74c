//! Wire and display message types for the bot connector.
//!
//! `ReplyEnvelope` and its parts mirror what the backend sends on the
//! wire; `DisplayMessage` is the normalized unit a frontend renders.
//! Reply items come in a closed set of three kinds (text, card,
//! quick-reply) and the connector passes unknown payload fields through
//! untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::session::SessionId;

/// Kind of a reply item returned by the backend.
///
/// Items without an explicit tag are treated as plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplyKind {
    #[default]
    Text,
    Card,
    QuickReply,
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyKind::Text => write!(f, "text"),
            ReplyKind::Card => write!(f, "card"),
            ReplyKind::QuickReply => write!(f, "quick-reply"),
        }
    }
}

impl FromStr for ReplyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReplyKind::Text),
            "card" => Ok(ReplyKind::Card),
            "quick-reply" => Ok(ReplyKind::QuickReply),
            other => Err(format!("invalid reply kind: '{other}'")),
        }
    }
}

/// A button attached to a card or quick-reply item.
///
/// `payload` is the value the frontend sends back when the button is
/// pressed; it is opaque to the connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyButton {
    pub label: String,
    pub payload: String,
}

/// Payload of a single reply item. All fields are optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<ReplyButton>>,
}

/// One reply item from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyItem {
    #[serde(rename = "type", default)]
    pub kind: ReplyKind,
    #[serde(default)]
    pub payload: ReplyPayload,
}

/// Raw reply body from the backend: zero or more items, array order
/// preserved. The backend may echo the session id back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    #[serde(default)]
    pub responses: Vec<ReplyItem>,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Payload of an outgoing user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingPayload {
    pub text: String,
}

/// Wire body for one user message. Immutable once constructed; a failed
/// delivery is re-sent to the next candidate endpoint without mutation.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingMessage {
    #[serde(rename = "type")]
    pub kind: ReplyKind,
    pub payload: OutgoingPayload,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

impl OutgoingMessage {
    /// Build the wire body for one user text message.
    pub fn text(text: impl Into<String>, session: &SessionId) -> Self {
        Self {
            kind: ReplyKind::Text,
            payload: OutgoingPayload { text: text.into() },
            session_id: session.to_string(),
        }
    }
}

/// Normalized reply unit rendered by a frontend.
///
/// Every item has displayable text; the normalizer substitutes a fixed
/// placeholder when the backend sent none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayMessage {
    pub kind: ReplyKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<ReplyButton>>,
}

/// Result of one message exchange with the backend.
#[derive(Debug, Clone, Serialize)]
pub struct ChatExchange {
    pub messages: Vec<DisplayMessage>,
    pub session_id: SessionId,
    pub received_at: DateTime<Utc>,
}

/// Outcome of a connection diagnostic probe.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
