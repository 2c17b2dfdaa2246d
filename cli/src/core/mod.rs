//! # Godzillops Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the chat engine and every platform:
//! - `config`: configuration loading, merging, and validation
//! - `error`: error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{GzError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
