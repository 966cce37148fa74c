//! Session identifier type and generation policy.
//!
//! A session id scopes a sequence of exchanged messages to one logical
//! conversation. It is opaque to the backend: the connector mints one
//! locally and threads it through every request.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque token for one logical conversation.
///
/// Created lazily on the first outgoing message and discarded on reset.
/// There is no server-side registration: the backend simply groups
/// messages that carry the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh session id.
    ///
    /// UUIDv7 carries a millisecond timestamp plus random bits, which is
    /// unique enough within a single client lifetime. A collision would
    /// only risk cross-talk inside one frontend instance, so no
    /// cryptographic guarantee is needed.
    pub fn generate() -> Self {
        Self(format!("session_{}", Uuid::now_v7()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_prefixed() {
        let id = SessionId::generate();
        assert!(id.as_str().starts_with("session_"));
    }

    #[test]
    fn test_generate_is_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_transparent() {
        let id = SessionId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let parsed: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
