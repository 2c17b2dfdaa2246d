//! # Google Admin SDK + Gmail
//!
//! File: cli/src/integrations/google/admin.rs
//!
//! ## Overview
//!
//! `GoogleAdmin` implements `AccountDirectory` on top of the Admin SDK
//! Directory API and Gmail:
//!
//! | Operation              | Request                                            |
//! |------------------------|----------------------------------------------------|
//! | primary domain         | `GET  customer/my_customer/domains`                |
//! | username available?   | `GET  users/{username}@{domain}` (404 = available) |
//! | create user            | `POST users`                                       |
//! | add to group           | `POST groups/{group}@{domain}/members`             |
//! | welcome email          | `POST (gmail) users/me/messages/send`              |
//!
//! The primary domain is looked up once and cached for the life of the client.
//!
use super::auth::{ServiceAccountKey, ServiceAccountTokenSource, TokenSource};
use crate::core::config::GoogleConfig;
use crate::core::error::{GzError, Result};
use crate::integrations::http::{endpoint, ensure_success};
use crate::integrations::{AccountDirectory, CreatedUser, NewUser, WelcomeEmail};
use anyhow::Context;
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

const SERVICE: &str = "Google";

pub struct GoogleAdmin {
    client: Client,
    tokens: Arc<dyn TokenSource>,
    directory_api_base: String,
    gmail_api_base: String,
    /// Address welcome emails are sent from (the impersonated admin).
    sender: String,
    domain: OnceCell<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainList {
    #[serde(default)]
    domains: Vec<Domain>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Domain {
    domain_name: String,
    #[serde(default)]
    is_primary: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserName<'a> {
    given_name: &'a str,
    family_name: &'a str,
}

#[derive(Serialize)]
struct Organization<'a> {
    title: &'a str,
    primary: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertUser<'a> {
    primary_email: String,
    name: UserName<'a>,
    password: &'a str,
    change_password_at_next_login: bool,
    recovery_email: &'a str,
    organizations: Vec<Organization<'a>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserResource {
    primary_email: String,
}

impl GoogleAdmin {
    pub fn new(
        client: Client,
        tokens: Arc<dyn TokenSource>,
        directory_api_base: impl Into<String>,
        gmail_api_base: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            client,
            tokens,
            directory_api_base: directory_api_base.into(),
            gmail_api_base: gmail_api_base.into(),
            sender: sender.into(),
            domain: OnceCell::new(),
        }
    }

    /// Reads the service account key and impersonates the configured super admin.
    pub fn from_config(config: &GoogleConfig, client: Client) -> Result<Self> {
        let key = ServiceAccountKey::from_file(Path::new(&config.service_account_file))
            .context("Failed to load the Google service account")?;
        debug!("Loaded Google service account {}", key.client_email);
        let mut tokens = ServiceAccountTokenSource::new(client.clone(), key, &config.super_admin);
        if let Some(token_uri) = &config.token_uri {
            tokens = tokens.with_token_uri(token_uri);
        }
        Ok(Self::new(
            client,
            Arc::new(tokens),
            &config.directory_api_base,
            &config.gmail_api_base,
            &config.super_admin,
        ))
    }

    pub async fn primary_domain(&self) -> Result<String> {
        self.domain
            .get_or_try_init(|| self.fetch_primary_domain())
            .await
            .cloned()
    }

    async fn fetch_primary_domain(&self) -> Result<String> {
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .get(endpoint(
                &self.directory_api_base,
                &["customer", "my_customer", "domains"],
            )?)
            .bearer_auth(token)
            .send()
            .await
            .map_err(GzError::from)?;
        let list: DomainList = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(GzError::from)?;
        let domain = list
            .domains
            .into_iter()
            .find(|d| d.is_primary)
            .map(|d| d.domain_name)
            .ok_or_else(|| GzError::Service {
                service: SERVICE.into(),
                reason: "no primary domain on the account".into(),
            })?;
        info!("Primary Google domain: {}", domain);
        Ok(domain)
    }

    fn raw_message(&self, email: &WelcomeEmail) -> String {
        let message = format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nMIME-Version: 1.0\r\nContent-Type: text/plain; charset=\"UTF-8\"\r\n\r\n{}",
            self.sender,
            email.to,
            email.subject,
            email.body.replace('\n', "\r\n")
        );
        URL_SAFE.encode(message)
    }
}

#[async_trait]
impl AccountDirectory for GoogleAdmin {
    async fn is_username_available(&self, username: &str) -> Result<bool> {
        let domain = self.primary_domain().await?;
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .get(endpoint(
                &self.directory_api_base,
                &["users", &format!("{}@{}", username, domain)],
            )?)
            .bearer_auth(token)
            .send()
            .await
            .map_err(GzError::from)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(true);
        }
        ensure_success(SERVICE, response).await?;
        Ok(false)
    }

    async fn create_user(&self, user: &NewUser) -> Result<CreatedUser> {
        let domain = self.primary_domain().await?;
        let token = self.tokens.access_token().await?;
        let body = InsertUser {
            primary_email: format!("{}@{}", user.username, domain),
            name: UserName {
                given_name: &user.given_name,
                family_name: &user.family_name,
            },
            password: &user.password,
            change_password_at_next_login: true,
            recovery_email: &user.recovery_email,
            organizations: vec![Organization {
                title: &user.job_title,
                primary: true,
            }],
        };
        info!("Creating Google user {}", body.primary_email);
        let response = self
            .client
            .post(endpoint(&self.directory_api_base, &["users"])?)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(GzError::from)?;
        let created: UserResource = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(GzError::from)?;
        Ok(CreatedUser {
            primary_email: created.primary_email,
        })
    }

    async fn add_to_group(&self, user_email: &str, group: &str) -> Result<()> {
        let domain = self.primary_domain().await?;
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(endpoint(
                &self.directory_api_base,
                &["groups", &format!("{}@{}", group, domain), "members"],
            )?)
            .bearer_auth(token)
            .json(&serde_json::json!({ "email": user_email, "role": "MEMBER" }))
            .send()
            .await
            .map_err(GzError::from)?;
        if response.status() == StatusCode::CONFLICT {
            warn!("{} is already a member of {}", user_email, group);
            return Ok(());
        }
        ensure_success(SERVICE, response)
            .await
            .with_context(|| format!("Failed to add {} to group {}", user_email, group))?;
        Ok(())
    }

    async fn send_welcome_email(&self, email: &WelcomeEmail) -> Result<()> {
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(endpoint(
                &self.gmail_api_base,
                &["users", "me", "messages", "send"],
            )?)
            .bearer_auth(token)
            .json(&serde_json::json!({ "raw": self.raw_message(email) }))
            .send()
            .await
            .map_err(GzError::from)?;
        ensure_success(SERVICE, response)
            .await
            .with_context(|| format!("Failed to send welcome email to {}", email.to))?;
        Ok(())
    }
}
