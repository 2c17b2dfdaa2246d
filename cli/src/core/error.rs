//! # Godzillops Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout Godzillops. Errors come
//! from three places: loading configuration, talking to external services
//! (Google, GitHub, Trello, Zapier, Giphy), and the platforms feeding text to
//! the chat engine.
//!
//! ## Architecture
//!
//! - `GzError`: a `thiserror` enum naming the failure domains.
//! - `Result<T>`: an alias for `anyhow::Result<T>` so call sites can attach
//!   context with `.context()` / `.with_context()`.
//!
//! ## Examples
//!
//! ```ignore
//! // Return a specific error type
//! if !response.status().is_success() {
//!     return Err(GzError::UnexpectedStatus { service: "GitHub".into(), status: 502, body })?;
//! }
//!
//! // Check for a specific variant after propagation
//! let unusable = err
//!     .downcast_ref::<GzError>()
//!     .map_or(false, |e| matches!(e, GzError::Service { .. }));
//! ```
//!
use thiserror::Error;

/// Custom error type for the Godzillops application.
#[derive(Error, Debug)]
pub enum GzError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("{service} responded with HTTP {status}: {body}")]
    UnexpectedStatus {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Authentication with {service} failed: {reason}")]
    Auth { service: String, reason: String },

    #[error("Signing the service account assertion failed: {source}")]
    Jwt {
        #[from]
        source: jsonwebtoken::errors::Error,
    },

    #[error("{service} returned an unusable response: {reason}")]
    Service { service: String, reason: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
