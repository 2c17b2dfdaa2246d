//! # Chat Context
//!
//! File: cli/src/bot/context.rs
//!
//! Who is talking to the bot. Platforms pass one with every message; the user
//! id keys the pending action state, `admin` gates account creation and invites.
//!
use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub user: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default = "default_tz")]
    pub tz: String,
}

fn default_tz() -> String {
    "UTC".to_string()
}

impl Context {
    /// Context for the terminal platforms, stamped with the local UTC offset.
    pub fn text_platform(user: impl Into<String>, admin: bool) -> Self {
        Self {
            user: user.into(),
            admin,
            tz: Local::now().offset().to_string(),
        }
    }

    /// Messages relayed without any context are treated as an unprivileged user.
    pub fn anonymous() -> Self {
        Self {
            user: "anonymous".to_string(),
            admin: false,
            tz: default_tz(),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::text_platform("text", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_admin_text_user() {
        let context = Context::default();
        assert_eq!(context.user, "text");
        assert!(context.admin);
        assert!(!context.tz.is_empty());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let context: Context = serde_json::from_str(r#"{"user": "U123"}"#).unwrap();
        assert_eq!(context, Context {
            user: "U123".into(),
            admin: false,
            tz: "UTC".into(),
        });
    }
}
