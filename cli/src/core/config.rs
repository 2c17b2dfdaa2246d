//! # Godzillops Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the configuration Godzillops needs to
//! talk to the outside world: service account credentials for Google, tokens for
//! GitHub and Trello, the Zapier webhook that fronts Abacus, the Giphy API key,
//! plus a few settings for the NLP pipeline and the HTTP platform.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file given with `--config` (or `GODZILLOPS_CONFIG`). When present
//!    it is the only file read.
//! 2. Project-specific `.godzillops.toml` in the current directory or ancestors
//!    (the search stops at a directory containing `.git`).
//! 3. User-specific `config.toml` in the platform config directory
//!    (`~/.config/godzillops/config.toml` on Linux).
//! 4. Default values defined in the code.
//!
//! Service sections (`[google]`, `[github]`, `[trello]`, `[abacus]`) are optional;
//! a missing section means the bot answers that the service is not configured.
//!
//! ## Examples
//!
//! ```toml
//! [bot]
//! name = "Godzillops"
//!
//! [nlp.extra_lexicon]
//! onboard = "VB"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [google]
//! service_account_file = "~/.secrets/godzillops-sa.json"
//! super_admin = "admin@example.com"
//!
//! [github]
//! org = "example"
//! team = "engineering"
//! access_token = "ghp_..."
//!
//! [trello]
//! org = "example"
//! api_key = "..."
//! token = "..."
//!
//! [abacus]
//! zapier_webhook = "https://hooks.zapier.com/hooks/catch/123/abc/"
//! ```
//!
use crate::core::error::{GzError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub nlp: NlpConfig,
    #[serde(default)]
    pub server: ServerSection,
    pub google: Option<GoogleConfig>,
    pub github: Option<GitHubConfig>,
    pub trello: Option<TrelloConfig>,
    pub abacus: Option<AbacusConfig>,
    #[serde(default)]
    pub giphy: GiphyConfig,
}

/// General bot settings.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name used by the terminal platform.
    #[serde(default = "default_bot_name")]
    pub name: String,
}

/// Settings for the tokenizer / tagger pipeline.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NlpConfig {
    /// Extra `word = "BROWN_TAG"` entries, consulted before the built-in lexicon.
    #[serde(default)]
    pub extra_lexicon: HashMap<String, String>,
}

/// Defaults for `godzillops serve`. Command-line flags override these.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_server_host")]
    pub host: IpAddr,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Google Workspace (Admin SDK + Gmail) credentials.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GoogleConfig {
    /// Path to the service account JSON key (can use ~). Will be expanded.
    pub service_account_file: String,
    /// Super admin the service account impersonates (domain-wide delegation).
    pub super_admin: String,
    #[serde(default = "default_directory_api_base")]
    pub directory_api_base: String,
    #[serde(default = "default_gmail_api_base")]
    pub gmail_api_base: String,
    /// Overrides the `token_uri` found in the service account key.
    pub token_uri: Option<String>,
}

/// GitHub organisation team invites.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    pub org: String,
    /// Team slug new members are added to.
    pub team: String,
    pub access_token: String,
    #[serde(default = "default_github_api_base")]
    pub api_base: String,
}

/// Trello organisation invites.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TrelloConfig {
    pub org: String,
    pub api_key: String,
    pub token: String,
    #[serde(default = "default_trello_api_base")]
    pub api_base: String,
}

/// Abacus invites go through a Zapier "catch hook".
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AbacusConfig {
    pub zapier_webhook: String,
}

/// Giphy search for the bot's favourite reaction.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GiphyConfig {
    #[serde(default = "default_giphy_api_key")]
    pub api_key: String,
    #[serde(default = "default_giphy_api_base")]
    pub api_base: String,
    #[serde(default = "default_giphy_query")]
    pub query: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for GiphyConfig {
    fn default() -> Self {
        Self {
            api_key: default_giphy_api_key(),
            api_base: default_giphy_api_base(),
            query: default_giphy_query(),
        }
    }
}

fn default_bot_name() -> String {
    "Godzillops".to_string()
}
fn default_server_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_server_port() -> u16 {
    8000
}
fn default_directory_api_base() -> String {
    "https://admin.googleapis.com/admin/directory/v1".to_string()
}
fn default_gmail_api_base() -> String {
    "https://gmail.googleapis.com/gmail/v1".to_string()
}
fn default_github_api_base() -> String {
    "https://api.github.com".to_string()
}
fn default_trello_api_base() -> String {
    "https://api.trello.com".to_string()
}
// Giphy's public beta key.
fn default_giphy_api_key() -> String {
    "dc6zaTOxFJmzC".to_string()
}
fn default_giphy_api_base() -> String {
    "https://api.giphy.com".to_string()
}
fn default_giphy_query() -> String {
    "godzilla".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".godzillops.toml";

/// Loads the effective configuration.
///
/// With `explicit` set, only that file is read and it must exist. Otherwise the
/// user and project files are merged over the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut config).context("Failed to expand paths in configuration")?;
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", redacted(&config));
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Godzillops", "godzillops") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path()? {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.godzillops.toml) found.");
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let mut path: &Path = &current_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Ok(Some(project_config));
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return Ok(None);
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => break,
        }
    }
    Ok(None)
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project settings win over user settings. Service sections are replaced
/// wholesale; scalar sections only when the project value differs from the default.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.bot.name = if project_cfg.bot.name != default_bot_name() {
        project_cfg.bot.name
    } else {
        user.bot.name
    };
    merged.nlp.extra_lexicon = user.nlp.extra_lexicon;
    merged.nlp.extra_lexicon.extend(project_cfg.nlp.extra_lexicon);
    merged.server.host = if project_cfg.server.host != default_server_host() {
        project_cfg.server.host
    } else {
        user.server.host
    };
    merged.server.port = if project_cfg.server.port != default_server_port() {
        project_cfg.server.port
    } else {
        user.server.port
    };
    merged.google = project_cfg.google.or(user.google);
    merged.github = project_cfg.github.or(user.github);
    merged.trello = project_cfg.trello.or(user.trello);
    merged.abacus = project_cfg.abacus.or(user.abacus);
    merged.giphy = if project_cfg.giphy != GiphyConfig::default() {
        project_cfg.giphy
    } else {
        user.giphy
    };
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(google) = config.google.as_mut() {
        google.service_account_file =
            shellexpand::tilde(&google.service_account_file).into_owned();
        debug!(
            "Expanded service account path: {}",
            google.service_account_file
        );
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if let Some(google) = &config.google {
        if !google.super_admin.contains('@') {
            return Err(anyhow!(GzError::Config(format!(
                "google.super_admin must be an email address, got '{}'.",
                google.super_admin
            ))));
        }
        if google.service_account_file.is_empty() {
            return Err(anyhow!(GzError::Config(
                "google.service_account_file cannot be empty.".to_string()
            )));
        }
        if !Path::new(&google.service_account_file).exists() {
            warn!(
                "Configured service account file '{}' does not exist.",
                google.service_account_file
            );
        }
    }
    if let Some(github) = &config.github {
        if github.org.is_empty() || github.team.is_empty() {
            return Err(anyhow!(GzError::Config(
                "github.org and github.team must both be set.".to_string()
            )));
        }
    }
    if let Some(trello) = &config.trello {
        if trello.org.is_empty() {
            return Err(anyhow!(GzError::Config(
                "trello.org cannot be empty.".to_string()
            )));
        }
    }
    if let Some(abacus) = &config.abacus {
        if !abacus.zapier_webhook.starts_with("http://")
            && !abacus.zapier_webhook.starts_with("https://")
        {
            return Err(anyhow!(GzError::Config(format!(
                "abacus.zapier_webhook must be an http(s) URL, got '{}'.",
                abacus.zapier_webhook
            ))));
        }
    }
    for (word, tag) in &config.nlp.extra_lexicon {
        if word.trim().is_empty() || tag.trim().is_empty() {
            return Err(anyhow!(GzError::Config(format!(
                "Invalid lexicon entry '{}' = '{}'.",
                word, tag
            ))));
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}

/// A copy of the configuration safe to log.
fn redacted(config: &Config) -> Config {
    let mut copy = config.clone();
    if let Some(github) = copy.github.as_mut() {
        github.access_token = "<redacted>".into();
    }
    if let Some(trello) = copy.trello.as_mut() {
        trello.api_key = "<redacted>".into();
        trello.token = "<redacted>".into();
    }
    copy.giphy.api_key = "<redacted>".into();
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [google]
            service_account_file = "~/sa.json"
            super_admin = "admin@example.com"

            [github]
            org = "example"
            team = "engineering"
            access_token = "secret"

            [nlp.extra_lexicon]
            onboard = "VB"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        let google = config.google.expect("google section");
        assert_eq!(google.super_admin, "admin@example.com");
        assert_eq!(google.directory_api_base, default_directory_api_base()); // Default
        assert_eq!(google.service_account_file, "~/sa.json"); // Not yet expanded
        let github = config.github.expect("github section");
        assert_eq!(github.api_base, "https://api.github.com");
        assert!(config.trello.is_none());
        assert_eq!(config.giphy, GiphyConfig::default());
        assert_eq!(config.nlp.extra_lexicon.get("onboard").map(String::as_str), Some("VB"));
        assert_eq!(config.bot.name, "Godzillops");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[bot]\nnickname = \"Zilla\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            google: Some(GoogleConfig {
                service_account_file: "~/sa.json".to_string(),
                super_admin: "admin@example.com".to_string(),
                directory_api_base: default_directory_api_base(),
                gmail_api_base: default_gmail_api_base(),
                token_uri: None,
            }),
            ..Default::default()
        };

        expand_config_paths(&mut config).unwrap();

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.google.unwrap().service_account_file,
            home_dir.join("sa.json").to_string_lossy()
        );
    }

    #[test]
    fn test_merge_prefers_project_sections() {
        let user: Config = toml::from_str(
            r#"
            [bot]
            name = "Zilla"
            [abacus]
            zapier_webhook = "https://hooks.zapier.com/user"
            [nlp.extra_lexicon]
            onboard = "VB"
            "#,
        )
        .unwrap();
        let project: Config = toml::from_str(
            r#"
            [server]
            port = 9100
            [abacus]
            zapier_webhook = "https://hooks.zapier.com/project"
            [nlp.extra_lexicon]
            offboard = "VB"
            "#,
        )
        .unwrap();

        let merged = merge_configs(user, Some(project));

        assert_eq!(merged.bot.name, "Zilla"); // Project left the default
        assert_eq!(merged.server.port, 9100);
        assert_eq!(
            merged.abacus.unwrap().zapier_webhook,
            "https://hooks.zapier.com/project"
        );
        assert_eq!(merged.nlp.extra_lexicon.len(), 2);
    }

    #[test]
    fn test_validate_config_bad_super_admin() {
        let config = Config {
            google: Some(GoogleConfig {
                service_account_file: "/tmp/sa.json".into(),
                super_admin: "admin".into(),
                directory_api_base: default_directory_api_base(),
                gmail_api_base: default_gmail_api_base(),
                token_uri: None,
            }),
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must be an email address"));
    }

    #[test]
    fn test_validate_config_bad_webhook() {
        let config = Config {
            abacus: Some(AbacusConfig {
                zapier_webhook: "hooks.zapier.com".into(),
            }),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("godzillops.toml");
        fs::write(
            &path,
            "[trello]\norg = \"example\"\napi_key = \"k\"\ntoken = \"t\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        let trello = config.trello.unwrap();
        assert_eq!(trello.org, "example");
        assert_eq!(trello.api_base, "https://api.trello.com");
    }

    #[test]
    fn test_load_explicit_file_missing() {
        let temp_dir = tempdir().unwrap();
        let result = load_config(Some(&temp_dir.path().join("nope.toml")));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read configuration file"));
    }

    #[test]
    fn test_redacted_hides_secrets() {
        let mut config = Config::default();
        config.github = Some(GitHubConfig {
            org: "o".into(),
            team: "t".into(),
            access_token: "ghp_secret".into(),
            api_base: default_github_api_base(),
        });
        let shown = format!("{:?}", redacted(&config));
        assert!(!shown.contains("ghp_secret"));
    }
}
