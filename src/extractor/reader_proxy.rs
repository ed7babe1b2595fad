use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app::{FeedpackError, Result};
use crate::extractor::ContentExtractor;
use crate::fetcher::UserAgentPool;

/// Settings for the readability proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderProxyConfig {
    /// Base URL; the article URL is appended as the path.
    pub proxy_base: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Requested output format (default: markdown)
    pub return_format: String,

    /// CSS selector the proxy should read from (default: body)
    pub target_selector: String,

    /// Pause between extracted items in milliseconds
    pub jitter_min_ms: u64,
    pub jitter_max_ms: u64,
}

impl Default for ReaderProxyConfig {
    fn default() -> Self {
        Self {
            proxy_base: "https://r.jina.ai".to_string(),
            timeout_secs: 30,
            return_format: "markdown".to_string(),
            target_selector: "body".to_string(),
            jitter_min_ms: 5000,
            jitter_max_ms: 10000,
        }
    }
}

impl ReaderProxyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_url(&self, article_url: &str) -> String {
        format!("{}/{}", self.proxy_base.trim_end_matches('/'), article_url)
    }
}

/// Extracts article text through a reader proxy (`GET {base}/{url}`).
pub struct ReaderProxyExtractor {
    client: Client,
    config: ReaderProxyConfig,
    user_agents: UserAgentPool,
}

impl ReaderProxyExtractor {
    pub fn new(config: ReaderProxyConfig, user_agents: UserAgentPool) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            config,
            user_agents,
        })
    }
}

#[async_trait]
impl ContentExtractor for ReaderProxyExtractor {
    async fn extract(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(self.config.request_url(url))
            .header(USER_AGENT, self.user_agents.pick())
            .header("X-Return-Format", &self.config.return_format)
            .header("X-Target-Selector", &self.config.target_selector)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FeedpackError::Upstream {
                status: status.as_u16(),
                body: crate::sink::snippet(&body),
            });
        }

        Ok(body)
    }
}
