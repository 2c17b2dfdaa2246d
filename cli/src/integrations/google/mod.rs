//! # Google Workspace
//!
//! File: cli/src/integrations/google/mod.rs
//!
//! - `auth`: service-account OAuth2 (signed JWT exchanged for an access token).
//! - `admin`: Admin SDK Directory calls plus Gmail for the welcome email.
//!
pub mod admin;
pub mod auth;

pub use admin::GoogleAdmin;
pub use auth::{ServiceAccountKey, ServiceAccountTokenSource, StaticToken, TokenSource};
