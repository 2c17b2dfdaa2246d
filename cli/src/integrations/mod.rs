//! # External Service Integrations
//!
//! File: cli/src/integrations/mod.rs
//!
//! ## Overview
//!
//! The bot's actions reach the outside world through three seams:
//!
//! - `AccountDirectory`: Google Workspace users, groups and the welcome email.
//! - `Inviter`: one per invite service (GitHub, Trello, Abacus).
//! - `GifSource`: the Giphy search behind the bot's "RAWR!".
//!
//! `Services::from_config` wires the real HTTP clients from configuration. A
//! service whose config section is missing is simply absent, and the bot tells
//! the user so. Tests build `Services` by hand with fakes.
//!
//! ## Architecture
//!
//! ```text
//! Services
//! ├── directory: Option<Arc<dyn AccountDirectory>>   (google::GoogleAdmin)
//! ├── gifs:      Arc<dyn GifSource>                   (giphy::Giphy)
//! └── inviters:  HashMap<InviteService, Arc<dyn Inviter>>
//!                 ├── GitHub → github::GitHubAdmin
//!                 ├── Trello → trello::TrelloAdmin
//!                 └── Abacus → abacus::AbacusAdmin
//! ```
//!
pub mod abacus;
pub mod giphy;
pub mod github;
pub mod google;
pub mod http;
pub mod trello;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::nlp::InviteService;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// A Google Workspace user about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub given_name: String,
    pub family_name: String,
    pub username: String,
    /// Personal address, used as the account's recovery email.
    pub recovery_email: String,
    pub job_title: String,
    /// Temporary password; must be changed at first login.
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedUser {
    pub primary_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Who to invite. Each service reads the fields it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invitee {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn is_username_available(&self, username: &str) -> Result<bool>;
    async fn create_user(&self, user: &NewUser) -> Result<CreatedUser>;
    async fn add_to_group(&self, user_email: &str, group: &str) -> Result<()>;
    async fn send_welcome_email(&self, email: &WelcomeEmail) -> Result<()>;
}

#[async_trait]
pub trait Inviter: Send + Sync {
    /// `Ok(false)` means the service answered but refused the invite.
    async fn invite(&self, invitee: &Invitee) -> Result<bool>;
}

#[async_trait]
pub trait GifSource: Send + Sync {
    /// URL of a random GIF.
    async fn random_gif(&self) -> Result<String>;
}

#[derive(Clone)]
pub struct Services {
    pub directory: Option<Arc<dyn AccountDirectory>>,
    pub gifs: Arc<dyn GifSource>,
    pub inviters: HashMap<InviteService, Arc<dyn Inviter>>,
}

impl Services {
    pub fn new(gifs: Arc<dyn GifSource>) -> Self {
        Self {
            directory: None,
            gifs,
            inviters: HashMap::new(),
        }
    }

    pub fn with_directory(mut self, directory: Arc<dyn AccountDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn with_inviter(mut self, service: InviteService, inviter: Arc<dyn Inviter>) -> Self {
        self.inviters.insert(service, inviter);
        self
    }

    /// Builds the real clients for every configured service.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http::build_client()?;
        let mut services = Self::new(Arc::new(giphy::Giphy::new(client.clone(), &config.giphy)));

        if let Some(google) = &config.google {
            let admin = google::GoogleAdmin::from_config(google, client.clone())?;
            services = services.with_directory(Arc::new(admin));
            info!("Google Workspace integration enabled.");
        }
        if let Some(github) = &config.github {
            services = services.with_inviter(
                InviteService::GitHub,
                Arc::new(github::GitHubAdmin::new(client.clone(), github)),
            );
        }
        if let Some(trello) = &config.trello {
            services = services.with_inviter(
                InviteService::Trello,
                Arc::new(trello::TrelloAdmin::new(client.clone(), trello)),
            );
        }
        if let Some(abacus) = &config.abacus {
            services = services.with_inviter(
                InviteService::Abacus,
                Arc::new(abacus::AbacusAdmin::new(client, abacus)),
            );
        }
        debug!(
            "Invite services configured: {:?}",
            services.inviters.keys().collect::<Vec<_>>()
        );
        Ok(services)
    }
}

/// In-process mock servers for the HTTP client tests.
#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serves `router` on an ephemeral port and returns its base URL.
    pub async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("mock server");
        });
        format!("http://{}", addr)
    }
}
