//! # Bot Actions
//!
//! File: cli/src/bot/actions/mod.rs
//!
//! Each action is a method on `Chat` that writes its replies into the current
//! `Turn`:
//!
//! - `social`: greet, GIFs and cancel.
//! - `google_account`: the multi-step Google Workspace account creation.
//! - `invite`: GitHub, Trello and Abacus invites.
//!
mod google_account;
mod invite;
mod social;
