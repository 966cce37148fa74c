//! Terminal error boundary for unreachable backends.
//!
//! When every candidate endpoint has failed, the exchange carries one
//! canned text reply instead of an error. Frontends render it like any
//! other bot message and need no separate error path.

use botline_types::message::{DisplayMessage, ReplyKind};

/// Fixed apology shown when every candidate endpoint failed.
pub const APOLOGY_TEXT: &str =
    "Sorry, I'm having trouble connecting to the bot right now. Please try again in a moment.";

/// Build the single canned reply used when the backend is unreachable.
pub fn unreachable_reply() -> DisplayMessage {
    DisplayMessage {
        kind: ReplyKind::Text,
        text: APOLOGY_TEXT.to_string(),
        buttons: None,
    }
}
