//! One-shot message send.

use botline_core::client::ChatClient;
use botline_core::transport::BotTransport;

use super::chat::print_message;

/// Send one message and print the normalized replies.
pub async fn run<T: BotTransport>(
    client: &ChatClient<T>,
    text: &str,
    json: bool,
) -> anyhow::Result<()> {
    let exchange = client.send_message(text).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&exchange)?);
    } else {
        for message in &exchange.messages {
            print_message(message);
        }
    }

    Ok(())
}
