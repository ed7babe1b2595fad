use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::app::{FeedpackError, Result};
use crate::domain::ResearchRecord;
use crate::sink::snippet;

pub const BATCH_SIZE: usize = 100;

/// Credentials for the table store. All four ids are needed; any missing
/// one disables the sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub base_url: String,
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    pub app_token: Option<String>,
    pub table_id: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            base_url: "https://open.feishu.cn".to_string(),
            app_id: None,
            app_secret: None,
            app_token: None,
            table_id: None,
            timeout_secs: 60,
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    msg: String,
    tenant_access_token: Option<String>,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    msg: String,
}

/// Pushes research records into a table as rows, 100 per request.
pub struct TableSink {
    client: Client,
    base_url: String,
    app_id: String,
    app_secret: String,
    app_token: String,
    table_id: String,
}

impl TableSink {
    pub fn from_config(config: &TableConfig) -> Result<Option<Self>> {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        let (Some(app_id), Some(app_secret), Some(app_token), Some(table_id)) = (
            non_empty(&config.app_id),
            non_empty(&config.app_secret),
            non_empty(&config.app_token),
            non_empty(&config.table_id),
        ) else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id,
            app_secret,
            app_token,
            table_id,
        }))
    }

    async fn access_token(&self) -> Result<String> {
        let url = format!(
            "{}/open-apis/auth/v3/tenant_access_token/internal",
            self.base_url
        );
        let response = self
            .client
            .post(url)
            .json(&json!({ "app_id": self.app_id, "app_secret": self.app_secret }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FeedpackError::Upstream {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&body)?;
        match parsed.tenant_access_token {
            Some(token) if parsed.code == 0 => Ok(token),
            _ => Err(FeedpackError::Other(format!(
                "Token exchange failed: code {} {}",
                parsed.code, parsed.msg
            ))),
        }
    }

    fn row(record: &ResearchRecord) -> Value {
        json!({
            "fields": {
                "uuid": record.uuid,
                "source": record.source,
                "title": record.title,
                "original_url": record.original_url,
                "publish_ts": record.publish_ts,
                "content_markdown": record.content_markdown,
                "tags": record.tags.join(","),
                "status": record.status,
            }
        })
    }

    /// Create one row per record. Returns the number of rows written.
    pub async fn push(&self, records: &[ResearchRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let token = self.access_token().await?;
        let url = format!(
            "{}/open-apis/bitable/v1/apps/{}/tables/{}/records/batch_create",
            self.base_url, self.app_token, self.table_id
        );

        let mut written = 0;
        for chunk in records.chunks(BATCH_SIZE) {
            let rows: Vec<Value> = chunk.iter().map(Self::row).collect();
            let response = self
                .client
                .post(&url)
                .bearer_auth(&token)
                .json(&json!({ "records": rows }))
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(FeedpackError::Upstream {
                    status: status.as_u16(),
                    body: snippet(&body),
                });
            }
            let parsed: ApiResponse = serde_json::from_str(&body)?;
            if parsed.code != 0 {
                return Err(FeedpackError::Other(format!(
                    "Batch create failed after {written} rows: code {} {}",
                    parsed.code, parsed.msg
                )));
            }

            written += chunk.len();
            tracing::debug!(rows = chunk.len(), written, "Table batch written");
        }

        Ok(written)
    }
}
