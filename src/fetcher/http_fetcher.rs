use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;

use crate::app::Result;
use crate::fetcher::{FetchResult, Fetcher, UserAgentPool};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(20);

pub struct HttpFetcher {
    client: Client,
    user_agents: UserAgentPool,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_FETCH_TIMEOUT, UserAgentPool::default())
    }

    pub fn with_options(timeout: Duration, user_agents: UserAgentPool) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            user_agents,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agents.pick())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(FetchResult::from_status(status, Vec::new()));
        }

        let body = response.bytes().await?.to_vec();
        Ok(FetchResult::Content { body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_port_url, serve_once};

    #[tokio::test]
    async fn test_fetch_content() {
        let url = serve_once("200 OK", "<rss></rss>").await;
        let fetcher = HttpFetcher::new().unwrap();
        match fetcher.fetch(&url).await.unwrap() {
            FetchResult::Content { body } => assert_eq!(body, b"<rss></rss>"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_blocked() {
        let url = serve_once("403 Forbidden", "denied").await;
        let fetcher = HttpFetcher::new().unwrap();
        assert!(matches!(
            fetcher.fetch(&url).await.unwrap(),
            FetchResult::Blocked(_)
        ));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let url = serve_once("404 Not Found", "").await;
        let fetcher = HttpFetcher::new().unwrap();
        assert!(matches!(
            fetcher.fetch(&url).await.unwrap(),
            FetchResult::NotFound
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        let url = closed_port_url().await;
        let fetcher = HttpFetcher::new().unwrap();
        assert!(fetcher.fetch(&url).await.is_err());
    }
}
