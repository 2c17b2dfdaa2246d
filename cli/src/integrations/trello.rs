//! # Trello Organisation Invites
//!
//! File: cli/src/integrations/trello.rs
//!
//! `PUT /1/organizations/{org}/members?key=..&token=..` with the invitee's
//! `email` and `fullName` as a form body.
//!
use super::{Invitee, Inviter};
use crate::core::config::TrelloConfig;
use crate::core::error::{GzError, Result};
use crate::integrations::http::endpoint;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::info;

pub struct TrelloAdmin {
    client: Client,
    api_base: String,
    org: String,
    api_key: String,
    token: String,
}

impl TrelloAdmin {
    pub fn new(client: Client, config: &TrelloConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.clone(),
            org: config.org.clone(),
            api_key: config.api_key.clone(),
            token: config.token.clone(),
        }
    }

    pub async fn invite_to_org(&self, email: &str, full_name: &str) -> Result<bool> {
        let url = endpoint(&self.api_base, &["1", "organizations", &self.org, "members"])?;
        let response = self
            .client
            .put(url)
            .query(&[("key", &self.api_key), ("token", &self.token)])
            .form(&[("email", email), ("fullName", full_name)])
            .send()
            .await
            .map_err(GzError::from)?;
        info!("Invite to Trello request status - {}", response.status());
        Ok(response.status() == StatusCode::OK)
    }
}

#[async_trait]
impl Inviter for TrelloAdmin {
    async fn invite(&self, invitee: &Invitee) -> Result<bool> {
        match (invitee.email.as_deref(), invitee.full_name.as_deref()) {
            (Some(email), Some(full_name)) => self.invite_to_org(email, full_name).await,
            _ => Err(GzError::Service {
                service: "Trello".into(),
                reason: "an email address and full name are required".into(),
            }
            .into()),
        }
    }
}
