//! # Godzillops
//!
//! File: cli/src/lib.rs
//!
//! ゴジラ Godzillops is a chat bot for business operations: it greets people,
//! posts Godzilla GIFs, creates Google Workspace accounts and invites people to
//! GitHub, Trello and Abacus, all from natural-language requests.
//!
//! The library holds the engine so platforms other than the bundled binary, and
//! the integration tests, can drive `bot::Chat` directly.
//!
//! - `nlp`: tokenizer, tagger and chunker.
//! - `bot`: the chat engine, dialogue state and actions.
//! - `integrations`: Google, GitHub, Trello, Abacus and Giphy clients.
//! - `commands`: the `chat`, `say`, `parse` and `serve` platforms.
//! - `core`: configuration and errors.
//!
pub mod bot;
pub mod commands;
pub mod core;
pub mod integrations;
pub mod nlp;
