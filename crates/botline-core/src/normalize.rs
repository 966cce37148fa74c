//! Reply normalization into display messages.
//!
//! Maps a raw reply envelope into the closed set of message variants a
//! frontend renders. Array order is preserved. An envelope without
//! items yields exactly one placeholder message so callers always have
//! something to show.

use botline_types::message::{DisplayMessage, ReplyEnvelope, ReplyKind};

/// Fixed text used when a reply item carries no displayable text.
pub const MISSING_TEXT_PLACEHOLDER: &str = "Bot response received";

/// Fixed text used when the backend accepted the message but sent no
/// reply items. Distinct from the unreachable-backend apology.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "The bot sent an empty reply. Please try again.";

/// Map a raw reply envelope into the messages a frontend renders.
pub fn normalize(envelope: ReplyEnvelope) -> Vec<DisplayMessage> {
    if envelope.responses.is_empty() {
        return vec![DisplayMessage {
            kind: ReplyKind::Text,
            text: EMPTY_REPLY_PLACEHOLDER.to_string(),
            buttons: None,
        }];
    }

    envelope
        .responses
        .into_iter()
        .map(|item| DisplayMessage {
            kind: item.kind,
            text: item
                .payload
                .text
                .unwrap_or_else(|| MISSING_TEXT_PLACEHOLDER.to_string()),
            buttons: item.payload.buttons,
        })
        .collect()
}
