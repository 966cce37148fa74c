//! Connection diagnostic.
//!
//! Prints the effective connection settings, probes the backend with a
//! test message, and reports the outcome.

use console::style;

use botline_core::client::ChatClient;
use botline_core::transport::BotTransport;

/// Probe the backend and report whether it answers.
pub async fn run<T: BotTransport>(client: &ChatClient<T>, json: bool) -> anyhow::Result<()> {
    let config = client.config();

    if !json {
        println!("{}", style("Connection settings").bold());
        println!("  base url: {}", config.base_url);
        println!("  bot id:   {}", config.bot_id);
        println!(
            "  token:    {}",
            if config.bearer_token().is_some() {
                "set"
            } else {
                "not set"
            }
        );
        println!();
    }

    let report = client.test_connection().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.success {
        println!("{} backend answered", style("ok").green().bold());
    } else {
        println!(
            "{} {}",
            style("failed").red().bold(),
            report.error.as_deref().unwrap_or("no details")
        );
    }

    Ok(())
}
