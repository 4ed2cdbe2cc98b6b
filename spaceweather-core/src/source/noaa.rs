use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::{error::FetchError, feed, model::ForecastData};

use super::FeedSource;

/// HTTP client for the SWPC ovation aurora feed.
///
/// Each instance owns its connection pool, which is released when the client
/// is dropped.
#[derive(Debug, Clone)]
pub struct NoaaAuroraClient {
    url: String,
    http: Client,
}

impl NoaaAuroraClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("spaceweather/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { url: url.into(), http })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the feed and return the response body unparsed.
    pub async fn fetch_text(&self) -> Result<String, FetchError> {
        tracing::debug!(url = %self.url, "requesting aurora feed");

        let res = self.http.get(&self.url).send().await.map_err(|source| {
            FetchError::Request { url: self.url.clone(), source }
        })?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, %status, "aurora feed request failed");
            let body = res.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
                body: truncate_body(&body),
            });
        }

        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Body { url: self.url.clone(), source })?;

        tracing::debug!(url = %self.url, bytes = body.len(), "received aurora feed");
        Ok(body)
    }
}

#[async_trait]
impl FeedSource for NoaaAuroraClient {
    async fn fetch(&self) -> Result<ForecastData, FetchError> {
        let body = self.fetch_text().await?;
        Ok(feed::parse(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
