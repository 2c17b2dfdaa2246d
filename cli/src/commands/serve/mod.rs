//! # Godzillops Serve Command
//!
//! File: cli/src/commands/serve/mod.rs
//!
//! ## Overview
//!
//! `godzillops serve` exposes the chat engine over HTTP so a chat platform
//! (Slack relay, webhook bridge, ...) can forward messages and post the replies.
//!
//! ## Architecture
//!
//! - `config.rs`: command-line flags merged with the `[server]` config section.
//! - `server_logic.rs`: the axum router, port fallback and graceful shutdown.
//!
//! ## Trust
//!
//! The server does no authentication. `context.user` and `context.admin` are
//! taken from the request as sent, so anyone who can reach `/chat` can act as
//! an admin. Bind to loopback (the default) or put it behind a relay that
//! authenticates the chat platform and sets the context itself. Pending
//! dialogue state per user id is bounded in age and count (`bot::state`).
//!
//! ## Examples
//!
//! ```bash
//! godzillops serve --port 8080
//! curl -s localhost:8080/chat -H 'content-type: application/json' \
//!      -d '{"text": "hi godzilla", "context": {"user": "U1", "admin": false}}'
//! ```
//!
use crate::bot::Chat;
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

pub use config::ServeArgs;

pub mod config;
pub mod server_logic;

pub async fn handle_serve(args: ServeArgs, config: &Config) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let server_config = config::ServerConfig::resolve(&args, &config.server);
    info!("Effective server config: {:?}", server_config);

    let chat = Chat::new(config).context("Failed to start the chat engine")?;
    server_logic::run_server(server_config, Arc::new(chat)).await?;

    Ok(())
}
