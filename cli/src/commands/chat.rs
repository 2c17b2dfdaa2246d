//! # Godzillops Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! `godzillops chat` talks to the bot in the terminal. Every line typed is sent
//! to the chat engine with a text-platform context; replies are printed as
//! `Godzillops: <reply>`. `bye`, `exit` or `quit` on a line of their own, or
//! end of input, end the session.
//!
//! ## Examples
//!
//! ```bash
//! godzillops chat
//! godzillops chat --user alice --no-admin
//! ```
//!
use crate::bot::{Chat, Context};
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context as _;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

const GOODBYES: &[&str] = &["bye", "exit", "quit"];

#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// User id the bot keeps your conversation state under.
    #[arg(long, default_value = "text")]
    pub user: String,

    /// Chat as a regular user (no account creation or invites).
    #[arg(long)]
    pub no_admin: bool,
}

pub async fn handle_chat(args: ChatArgs, config: &Config) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);
    let chat = Chat::new(config).context("Failed to start the chat engine")?;
    let context = Context::text_platform(&args.user, !args.no_admin);
    let name = &config.bot.name;

    println!("{} is listening. Say 'bye' to leave.", name);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from stdin")?
        else {
            println!();
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if GOODBYES.contains(&input.to_lowercase().as_str()) {
            break;
        }

        for reply in chat.respond(input, Some(context.clone())).await {
            println!("{}: {}", name, reply);
        }
    }

    info!("Chat session ended.");
    Ok(())
}
