pub mod http_fetcher;
pub mod jitter;
pub mod poller;
pub mod user_agent;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use jitter::Jitter;
pub use poller::{PollReport, Poller, PollerSettings, SourceOutcome};
pub use user_agent::UserAgentPool;

#[derive(Debug)]
pub enum FetchResult {
    /// 2xx with a body
    Content { body: Vec<u8> },
    /// 403/406, most likely a WAF
    Blocked(StatusCode),
    /// 404
    NotFound,
    /// Any other non-success status
    Rejected(StatusCode),
}

impl FetchResult {
    pub fn from_status(status: StatusCode, body: Vec<u8>) -> Self {
        match status {
            s if s.is_success() => FetchResult::Content { body },
            StatusCode::FORBIDDEN | StatusCode::NOT_ACCEPTABLE => FetchResult::Blocked(status),
            StatusCode::NOT_FOUND => FetchResult::NotFound,
            s => FetchResult::Rejected(s),
        }
    }
}

/// Network errors and timeouts come back as `Err`.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult>;
}
