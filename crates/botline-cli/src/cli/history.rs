//! Message-log display for the current session.

use console::style;

use botline_core::client::ChatClient;
use botline_core::transport::BotTransport;

use super::chat::print_message;

/// Fetch and print the current session's message log.
///
/// Sessions live only as long as the process, so outside an interactive
/// chat this is usually empty.
pub async fn run<T: BotTransport>(client: &ChatClient<T>, json: bool) -> anyhow::Result<()> {
    let messages = client.conversation_history().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!(
            "{}",
            style("No history. Sessions are per-conversation and do not persist.").dim()
        );
    } else {
        for message in &messages {
            print_message(message);
        }
    }

    Ok(())
}
