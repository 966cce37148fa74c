//! CLI command definitions for the `botline` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod diag;
pub mod history;
pub mod send;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Talk to a hosted bot backend from the terminal.
#[derive(Parser)]
#[command(name = "botline", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Optional TOML file with connection settings (env vars take precedence).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat with the bot.
    Chat,

    /// Send a single message and print the replies.
    Send {
        /// Message text to deliver.
        text: String,
    },

    /// Show the message log for the current session.
    History,

    /// Probe the backend and report whether it answers.
    Test,
}
