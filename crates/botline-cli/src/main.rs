//! Botline CLI entry point.
//!
//! Binary name: `botline`
//!
//! Parses CLI arguments, loads connection settings, builds the chat
//! client, then dispatches to the requested command.

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,botline_core=debug,botline_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = botline_infra::config::load_config(cli.config.as_deref()).await;
    let client = botline_infra::build_client(config);

    match cli.command {
        Commands::Chat => cli::chat::run(&client).await?,
        Commands::Send { text } => cli::send::run(&client, &text, cli.json).await?,
        Commands::History => cli::history::run(&client, cli.json).await?,
        Commands::Test => cli::diag::run(&client, cli.json).await?,
    }

    Ok(())
}
