//! # Godzillops CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests. Each `.rs` file in `cli/tests/`
//! is its own test crate; the ones that need these declare `mod common;`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// An `assert_cmd::Command` for the compiled `godzillops` binary.
///
/// `RUST_LOG` is cleared so a developer's log settings never leak into
/// stdout/stderr assertions.
pub fn godzillops_cmd() -> Command {
    let mut cmd = Command::cargo_bin("godzillops").expect("Failed to find godzillops binary for testing");
    cmd.env_remove("RUST_LOG").env_remove("GODZILLOPS_CONFIG");
    cmd
}

/// Writes `contents` to a `godzillops.toml` in a fresh temp dir. Keep the
/// `TempDir` alive for as long as the path is used.
pub fn temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("godzillops.toml");
    std::fs::write(&path, contents).expect("Failed to write temp config");
    (dir, path)
}
