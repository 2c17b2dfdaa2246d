//! # Godzillops Say Command
//!
//! File: cli/src/commands/say.rs
//!
//! `godzillops say <TEXT...>` sends one message and prints each reply on its
//! own line. Conversation state does not outlive the process, so multi-step
//! actions only get as far as their first question.
//!
use crate::bot::{Chat, Context};
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context as _;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct SayArgs {
    /// The message to send. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    #[arg(long, default_value = "text")]
    pub user: String,

    #[arg(long)]
    pub no_admin: bool,
}

pub async fn handle_say(args: SayArgs, config: &Config) -> Result<()> {
    info!("Handling say command with args: {:?}", args);
    let chat = Chat::new(config).context("Failed to start the chat engine")?;
    let context = Context::text_platform(&args.user, !args.no_admin);

    for reply in chat.respond(&args.text.join(" "), Some(context)).await {
        println!("{}", reply);
    }
    Ok(())
}
