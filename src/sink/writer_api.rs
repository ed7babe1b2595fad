use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app::Result;
use crate::sink::snippet;

/// Writer API settings; `WRITER_API_URL` / `WRITER_API_KEY` override these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardOutcome {
    pub ok: bool,
    pub status: u16,
    /// Response body, first 200 characters.
    pub detail: String,
}

/// POSTs a pack as JSON to the downstream writer service.
pub struct WriterApi {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl WriterApi {
    /// `None` when no endpoint is configured.
    pub fn from_config(config: &ForwardConfig) -> Result<Option<Self>> {
        let Some(url) = config.url.as_deref().filter(|u| !u.trim().is_empty()) else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(Self {
            client,
            url: url.to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        }))
    }

    pub async fn forward<T: Serialize + ?Sized>(&self, pack: &T) -> Result<ForwardOutcome> {
        let mut request = self.client.post(&self.url).json(pack);
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {key}"));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        Ok(ForwardOutcome {
            ok: !status.is_client_error() && !status.is_server_error(),
            status: status.as_u16(),
            detail: snippet(&body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;

    fn config(url: Option<String>, api_key: Option<&str>) -> ForwardConfig {
        ForwardConfig {
            url,
            api_key: api_key.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_url_skips_forwarding() {
        assert!(WriterApi::from_config(&config(None, None)).unwrap().is_none());
        assert!(WriterApi::from_config(&config(Some("  ".into()), None))
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_forward_posts_json_with_bearer() {
        let (url, requests) = serve(vec![("201 Created", "queued".to_string())]).await;
        let api = WriterApi::from_config(&config(Some(url), Some("secret")))
            .unwrap()
            .unwrap();

        let outcome = api
            .forward(&serde_json::json!({"items": [1, 2]}))
            .await
            .unwrap();
        assert!(outcome.ok);
        assert_eq!(outcome.status, 201);
        assert_eq!(outcome.detail, "queued");

        let request = requests.await.unwrap().remove(0);
        let lower = request.to_lowercase();
        assert!(lower.starts_with("post / "));
        assert!(lower.contains("authorization: bearer secret"));
        assert!(lower.contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"items":[1,2]}"#));
    }

    #[tokio::test]
    async fn test_forward_failure_truncates_body() {
        let long = "e".repeat(500);
        let (url, _requests) = serve(vec![("500 Internal Server Error", long)]).await;
        let api = WriterApi::from_config(&config(Some(url), None))
            .unwrap()
            .unwrap();

        let outcome = api.forward(&serde_json::json!({})).await.unwrap();
        assert!(!outcome.ok);
        assert_eq!(outcome.status, 500);
        assert_eq!(outcome.detail.chars().count(), 200);
    }
}
