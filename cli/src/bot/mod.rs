//! # Bot
//!
//! File: cli/src/bot/mod.rs
//!
//! ## Overview
//!
//! The chat engine and everything it keeps between messages:
//!
//! - `chat`: `Chat`, the entry point every platform calls.
//! - `context`: who sent the message.
//! - `state`: actions, dialogue steps and per-user pending state.
//! - `intent`: chunk tree + pending state -> action and arguments.
//! - `actions`: what each action does.
//!
mod actions;
pub mod chat;
pub mod context;
pub mod intent;
pub mod state;

pub use chat::{Chat, ERROR_REPLY};
pub use context::Context;
pub use intent::{determine_action, Intent};
pub use state::{Action, ActionArgs, ActionState, StateStore, Step};
