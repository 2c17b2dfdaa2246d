//! # Godzillops Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Each command is a platform: a different way of feeding text to the chat
//! engine and showing its replies. `main.rs` parses the arguments and calls the
//! matching `handle_*` function with the loaded configuration.
//!
//! ## Commands
//!
//! - `chat`: interactive terminal session
//! - `say`: answer a single message and exit
//! - `parse`: show how a message is tokenized, tagged and chunked
//! - `serve`: HTTP endpoint for relaying messages from a chat platform
//!

/// Interactive REPL (the "text" platform).
pub mod chat;
/// Debug view of the NLP pipeline.
pub mod parse;
/// One-shot reply.
pub mod say;
/// HTTP platform. Includes configuration and server logic.
pub mod serve;
