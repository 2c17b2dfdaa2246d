//! # Abacus Invites
//!
//! File: cli/src/integrations/abacus.rs
//!
//! Abacus has no public invite API; a Zapier "catch hook" triggers the
//! "Invite New User" action instead. We POST `{"email": ...}` to the hook.
//!
use super::{Invitee, Inviter};
use crate::core::config::AbacusConfig;
use crate::core::error::{GzError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::info;

pub struct AbacusAdmin {
    client: Client,
    zapier_webhook: String,
}

impl AbacusAdmin {
    pub fn new(client: Client, config: &AbacusConfig) -> Self {
        Self {
            client,
            zapier_webhook: config.zapier_webhook.clone(),
        }
    }

    pub async fn invite_by_email(&self, email: &str) -> Result<bool> {
        let response = self
            .client
            .post(&self.zapier_webhook)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(GzError::from)?;
        info!("Invite to Abacus request status - {}", response.status());
        Ok(response.status() == StatusCode::OK)
    }
}

#[async_trait]
impl Inviter for AbacusAdmin {
    async fn invite(&self, invitee: &Invitee) -> Result<bool> {
        let email = invitee.email.as_deref().ok_or_else(|| GzError::Service {
            service: "Abacus".into(),
            reason: "an email address is required".into(),
        })?;
        self.invite_by_email(email).await
    }
}
