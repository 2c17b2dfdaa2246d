//! # Shared HTTP Client
//!
//! File: cli/src/integrations/http.rs
//!
//! Every integration talks HTTP through one `reqwest::Client` built here, so
//! they all share a user agent, timeouts and the connection pool.
//!
use crate::core::error::{GzError, Result};
use anyhow::Context;
use reqwest::{Client, ClientBuilder, Response, Url};
use std::time::Duration;

const USER_AGENT: &str = concat!("godzillops/", env!("CARGO_PKG_VERSION"), " (+reqwest)");

pub fn build_client() -> Result<Client> {
    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .tcp_nodelay(true)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(GzError::from)
        .context("Failed to build HTTP client")
}

/// Passes successful responses through; turns anything else into
/// `GzError::UnexpectedStatus` carrying the response body.
pub async fn ensure_success(service: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GzError::UnexpectedStatus {
        service: service.to_string(),
        status: status.as_u16(),
        body,
    }
    .into())
}

/// Appends path segments to a base URL. Each segment is percent-encoded, so
/// user-supplied text cannot add path levels, a query or a fragment.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("Invalid API base URL: {}", base))?;
    url.path_segments_mut()
        .map_err(|_| GzError::Config(format!("API base URL cannot take a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
