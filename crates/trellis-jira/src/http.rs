//! HTTP implementation of [`ItemClient`] over reqwest.

use crate::client::ItemClient;
use crate::error::{Error, Result};
use crate::types::{ItemRecord, SearchPage, ServerInfo};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tracker client that issues real REST calls.
///
/// Holds a single pooled [`reqwest::Client`]; cloning is cheap and shares
/// the pool. Authentication is the caller's concern (deployment-local
/// trackers and pre-authenticated proxies need none).
#[derive(Debug, Clone)]
pub struct HttpItemClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpItemClient {
    /// Create a client for the tracker at `base_url`.
    ///
    /// Trailing slashes on `base_url` are trimmed so path joining stays
    /// predictable.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the underlying TLS/connector setup fails.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("trellis/", env!("CARGO_PKG_VERSION")))
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Status check + JSON decode shared by every endpoint.
    ///
    /// Reads the body as text and decodes with serde_json directly so a
    /// malformed payload surfaces as `Error::Decode` rather than a generic
    /// transport error.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        context: &str,
    ) -> Result<T> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(context.to_string()));
        }
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                context: context.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ItemClient for HttpItemClient {
    async fn fetch_item(&self, key: &str, fields: &[&str]) -> Result<ItemRecord> {
        let mut url = format!("{}/rest/api/3/issue/{}", self.base_url, key);
        if !fields.is_empty() {
            url.push_str("?fields=");
            url.push_str(&fields.join(","));
        }

        tracing::debug!(key, ?fields, "fetching item");
        let response = self.client.get(&url).send().await?;
        Self::decode(response, key).await
    }

    async fn search_items(&self, jql: &str, fields: &[&str]) -> Result<Vec<ItemRecord>> {
        let url = format!("{}/rest/api/3/search", self.base_url);
        let body = serde_json::json!({
            "jql": jql,
            "fields": fields,
        });

        tracing::debug!(jql, "searching items");
        let response = self.client.post(&url).json(&body).send().await?;
        let page: SearchPage = Self::decode(response, jql).await?;
        Ok(page.issues)
    }

    async fn server_info(&self) -> Result<ServerInfo> {
        let url = format!("{}/rest/api/3/serverInfo", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response, "serverInfo").await
    }
}
