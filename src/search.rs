//! The search module queries a SearXNG instance for source material in
//! keyword mode.

use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::endpoint_url;
use crate::constants::{SEARCH_FORMAT, SEARCH_LANGUAGE, SEARCH_PATH};
use crate::error::{Error, Result, Stage, check_status};

/// A single search hit. Every field is optional because backends omit them
/// freely.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    results: Option<Vec<SearchResult>>,
}

/// Source of search results for keyword mode.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Returns at most `limit` results in backend order.
    ///
    /// Implementations never fail: an unreachable backend and an empty
    /// result list look the same to the caller.
    async fn search(&self, query: &str, limit: usize) -> Vec<SearchResult>;
}

/// HTTP client for the SearXNG JSON API.
pub struct SearxngClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl SearxngClient {
    /// Creates a client for the SearXNG instance at `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a valid URL.
    pub fn new(client: reqwest::Client, base: &str) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: endpoint_url(base, SEARCH_PATH)?,
        })
    }

    async fn try_search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("q", query),
                ("format", SEARCH_FORMAT),
                ("language", SEARCH_LANGUAGE),
            ])
            .send()
            .await
            .map_err(Error::transport(Stage::Search))?;

        let payload = check_status(Stage::Search, response)
            .await?
            .text()
            .await
            .map_err(Error::transport(Stage::Search))?;

        parse_search_payload(&payload, limit).map_err(|err| Error::Backend {
            stage: Stage::Search,
            status: reqwest::StatusCode::OK,
            body: format!("invalid search payload: {err}"),
        })
    }
}

#[async_trait]
impl SearchBackend for SearxngClient {
    async fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        info!("SearXNGで検索中: {query}");
        match self.try_search(query, limit).await {
            Ok(results) => {
                if results.is_empty() {
                    warn!("No search results for {query}");
                }
                results
            }
            Err(err) => {
                warn!("SearXNG search failed: {err}");
                if let Some(body) = err.backend_body() {
                    warn!("{body}");
                }
                Vec::new()
            }
        }
    }
}

/// Parses a SearXNG JSON payload and keeps the first `limit` results.
///
/// A payload without a `results` list yields no results.
///
/// # Errors
///
/// Returns an error if the payload is not valid JSON of the expected shape.
pub fn parse_search_payload(payload: &str, limit: usize) -> serde_json::Result<Vec<SearchResult>> {
    let payload: SearchPayload = serde_json::from_str(payload)?;
    Ok(payload
        .results
        .unwrap_or_default()
        .into_iter()
        .take(limit)
        .collect())
}
