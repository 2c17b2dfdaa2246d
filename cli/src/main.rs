//! # Godzillops Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the Godzillops CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the configuration
//! - Routing execution to the platform the user picked
//!
//! ## Architecture
//!
//! - Each platform (`chat`, `say`, `parse`, `serve`) is a variant in the `Commands` enum
//! - Commands are mapped to handler functions in their respective modules
//! - All errors are propagated to this level for consistent handling
//!
//! Logs go to stderr so the bot's replies on stdout stay clean.
//!
//! ## Examples
//!
//! ```bash
//! # Talk to the bot
//! godzillops chat
//!
//! # One message, with debug logging and an explicit config file
//! godzillops -vv --config ./godzillops.toml say "hi godzilla"
//! ```
//!
use clap::Parser;
use godzillops::{commands, core::config};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "godzillops",
    about = "ゴジラ Godzillops: NLP chat bot capable of performing business operations",
    long_about = "Talk to Godzillops in plain English: it greets you back, finds Godzilla GIFs,\n\
                  creates Google accounts and invites people to GitHub, Trello and Abacus.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase message verbosity (-v for info, -vv for debug, -vvv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Read configuration from this file only.
    #[arg(long, global = true, env = "GODZILLOPS_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Chat with the bot in the terminal.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Send one message and print the replies.
    Say(commands::say::SayArgs),
    /// Show how a message is tokenized, tagged and chunked.
    #[command(alias = "p")]
    Parse(commands::parse::ParseArgs),
    /// Serve the bot over HTTP.
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match config::load_config(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Chat(args) => commands::chat::handle_chat(args, &config).await,
            Commands::Say(args) => commands::say::handle_say(args, &config).await,
            Commands::Parse(args) => commands::parse::handle_parse(args, &config),
            Commands::Serve(args) => commands::serve::handle_serve(args, &config).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
