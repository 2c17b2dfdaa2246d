//! # GitHub Team Invites
//!
//! File: cli/src/integrations/github.rs
//!
//! Adds a user to the configured organisation team with
//! `PUT /orgs/{org}/teams/{team}/memberships/{username}`. GitHub sends the
//! invitation email itself when the user is not yet an org member.
//!
use super::{Invitee, Inviter};
use crate::core::config::GitHubConfig;
use crate::core::error::{GzError, Result};
use crate::integrations::http::endpoint;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{info, warn};

pub struct GitHubAdmin {
    client: Client,
    api_base: String,
    org: String,
    team: String,
    access_token: String,
}

impl GitHubAdmin {
    pub fn new(client: Client, config: &GitHubConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.clone(),
            org: config.org.clone(),
            team: config.team.clone(),
            access_token: config.access_token.clone(),
        }
    }

    pub async fn invite_to_team(&self, username: &str) -> Result<bool> {
        let url = endpoint(
            &self.api_base,
            &["orgs", &self.org, "teams", &self.team, "memberships", username],
        )?;
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.access_token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&serde_json::json!({ "role": "member" }))
            .send()
            .await
            .map_err(GzError::from)?;

        let status = response.status();
        info!("Invite to GitHub request status - {}", status);
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!("GitHub refused invite for {}: {}", username, body);
        }
        Ok(status == StatusCode::OK)
    }
}

#[async_trait]
impl Inviter for GitHubAdmin {
    async fn invite(&self, invitee: &Invitee) -> Result<bool> {
        let username = invitee.username.as_deref().ok_or_else(|| GzError::Service {
            service: "GitHub".into(),
            reason: "a username is required".into(),
        })?;
        self.invite_to_team(username).await
    }
}
