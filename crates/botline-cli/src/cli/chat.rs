//! Interactive chat loop.

use std::io::{self, BufRead, Write};

use console::style;

use botline_core::client::ChatClient;
use botline_core::transport::BotTransport;
use botline_types::message::DisplayMessage;

/// Run the interactive loop until EOF or `/quit`.
pub async fn run<T: BotTransport>(client: &ChatClient<T>) -> anyhow::Result<()> {
    println!(
        "{} {}",
        style("botline").magenta().bold(),
        style(format!("-- {}", client.config().base_url)).dim()
    );
    println!(
        "{}",
        style("Commands: /reset, /history, /quit").dim()
    );

    let stdin = io::stdin();
    loop {
        print!("{} ", style(">").cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/exit" => break,
            "/reset" => {
                client.reset_session().await;
                println!("{}", style("Session reset.").dim());
            }
            "/history" => {
                let messages = client.conversation_history().await;
                if messages.is_empty() {
                    println!("{}", style("No history for this session.").dim());
                } else {
                    for message in &messages {
                        print_message(message);
                    }
                }
            }
            _ => {
                let exchange = client.send_message(input).await;
                for message in &exchange.messages {
                    print_message(message);
                }
            }
        }
    }

    Ok(())
}

/// Print one normalized reply, with any buttons as a numbered list.
pub fn print_message(message: &DisplayMessage) {
    println!("{} {}", style("bot:").green().bold(), message.text);
    if let Some(buttons) = &message.buttons {
        for (i, button) in buttons.iter().enumerate() {
            println!(
                "     {} {}",
                style(format!("[{}]", i + 1)).yellow(),
                button.label
            );
        }
    }
}
