//! # Giphy
//!
//! File: cli/src/integrations/giphy.rs
//!
//! Searches Giphy (`GET /v1/gifs/search`) and returns the downsized URL of a
//! random result.
//!
use super::GifSource;
use crate::core::config::GiphyConfig;
use crate::core::error::{GzError, Result};
use crate::integrations::http::{endpoint, ensure_success};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::Deserialize;

const SEARCH_LIMIT: &str = "25";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Gif>,
}

#[derive(Deserialize)]
struct Gif {
    images: Images,
}

#[derive(Deserialize)]
struct Images {
    downsized: Rendition,
}

#[derive(Deserialize)]
struct Rendition {
    url: String,
}

pub struct Giphy {
    client: Client,
    api_base: String,
    api_key: String,
    query: String,
}

impl Giphy {
    pub fn new(client: Client, config: &GiphyConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            query: config.query.clone(),
        }
    }
}

#[async_trait]
impl GifSource for Giphy {
    async fn random_gif(&self) -> Result<String> {
        let response = self
            .client
            .get(endpoint(&self.api_base, &["v1", "gifs", "search"])?)
            .query(&[
                ("q", self.query.as_str()),
                ("api_key", self.api_key.as_str()),
                ("limit", SEARCH_LIMIT),
            ])
            .send()
            .await
            .map_err(GzError::from)?;
        let results: SearchResponse = ensure_success("Giphy", response)
            .await?
            .json()
            .await
            .map_err(GzError::from)?;

        let gif = results.data.choose(&mut rand::thread_rng()).ok_or_else(|| GzError::Service {
            service: "Giphy".into(),
            reason: format!("no results for '{}'", self.query),
        })?;
        Ok(gif.images.downsized.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::{http::build_client, test_support};
    use axum::{extract::Query, routing::get, Json, Router};
    use std::collections::HashMap;

    fn giphy(base: String, query: &str) -> Giphy {
        Giphy::new(
            build_client().unwrap(),
            &GiphyConfig {
                api_key: "key".into(),
                api_base: base,
                query: query.into(),
            },
        )
    }

    async fn search(Query(params): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
        assert_eq!(params.get("api_key").map(String::as_str), Some("key"));
        assert_eq!(params.get("limit").map(String::as_str), Some("25"));
        if params.get("q").map(String::as_str) == Some("godzilla") {
            Json(serde_json::json!({
                "data": [
                    { "images": { "downsized": { "url": "https://media.giphy.com/a.gif" } } },
                    { "images": { "downsized": { "url": "https://media.giphy.com/b.gif" } } }
                ]
            }))
        } else {
            Json(serde_json::json!({ "data": [] }))
        }
    }

    #[tokio::test]
    async fn test_random_gif_from_results() {
        let base = test_support::spawn(Router::new().route("/v1/gifs/search", get(search))).await;
        let url = giphy(base, "godzilla").random_gif().await.unwrap();
        assert!(url == "https://media.giphy.com/a.gif" || url == "https://media.giphy.com/b.gif");
    }

    #[tokio::test]
    async fn test_empty_results_are_an_error() {
        let base = test_support::spawn(Router::new().route("/v1/gifs/search", get(search))).await;
        let err = giphy(base, "mothra").random_gif().await.unwrap_err();
        assert!(err.to_string().contains("no results for 'mothra'"));
    }
}
