use std::sync::Arc;

use reqwest::StatusCode;

use crate::domain::{FeedSource, SeenState};
use crate::fetcher::{FetchResult, Fetcher, Jitter};
use crate::normalizer::{Normalizer, ParseMode, SourceBatch};

pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

#[derive(Debug, Clone)]
pub struct PollerSettings {
    /// Consecutive failures after which a source is reported invalid.
    pub failure_threshold: u32,
    /// Clear a source's failure counter after a successful fetch.
    pub reset_failures_on_success: bool,
    /// Pause between sources.
    pub jitter: Jitter,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            reset_failures_on_success: false,
            jitter: Jitter::from_millis(1000, 3000),
        }
    }
}

/// What happened to one source during a poll.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Fetched { entries: usize, mode: ParseMode },
    Blocked(StatusCode),
    NotFound { failures: u32 },
    Failed { failures: u32, reason: String },
}

impl SourceOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SourceOutcome::NotFound { .. } | SourceOutcome::Failed { .. })
    }
}

#[derive(Debug, Default)]
pub struct PollReport {
    pub batches: Vec<SourceBatch>,
    pub outcomes: Vec<(String, SourceOutcome)>,
    /// Sources first reported as invalid during this poll.
    pub alerts: Vec<String>,
}

impl PollReport {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_failure()).count()
    }

    pub fn entry_count(&self) -> usize {
        self.batches.iter().map(|b| b.entries.len()).sum()
    }
}

/// Fetches sources one at a time, tracking per-source failures in the
/// run's `SeenState`.
pub struct Poller {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    settings: PollerSettings,
}

impl Poller {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        normalizer: Normalizer,
        settings: PollerSettings,
    ) -> Self {
        Self {
            fetcher,
            normalizer,
            settings,
        }
    }

    pub async fn poll(&self, sources: &[FeedSource], state: &mut SeenState) -> PollReport {
        let mut report = PollReport::default();

        for (i, source) in sources.iter().enumerate() {
            if i > 0 {
                self.settings.jitter.pause().await;
            }

            let outcome = self.poll_one(source, state, &mut report).await;
            report.outcomes.push((source.name().to_string(), outcome));
        }

        report
    }

    async fn poll_one(
        &self,
        source: &FeedSource,
        state: &mut SeenState,
        report: &mut PollReport,
    ) -> SourceOutcome {
        let name = source.name();

        let body = match self.fetcher.fetch(&source.url).await {
            Ok(FetchResult::Content { body }) => body,
            Ok(FetchResult::Blocked(status)) => {
                tracing::warn!(source = %name, status = %status, "Blocked by WAF, skipping");
                return SourceOutcome::Blocked(status);
            }
            Ok(FetchResult::NotFound) => {
                let failures = state.record_failure(name);
                tracing::warn!(source = %name, failures, "Feed returned 404");
                if failures >= self.settings.failure_threshold && state.mark_alerted(name) {
                    tracing::error!(
                        source = %name,
                        url = %source.url,
                        failures,
                        "Invalid source: repeated 404s"
                    );
                    report.alerts.push(name.to_string());
                }
                return SourceOutcome::NotFound { failures };
            }
            Ok(FetchResult::Rejected(status)) => {
                let failures = state.record_failure(name);
                tracing::warn!(source = %name, status = %status, failures, "Fetch rejected");
                return SourceOutcome::Failed {
                    failures,
                    reason: status.to_string(),
                };
            }
            Err(e) => {
                let failures = state.record_failure(name);
                tracing::warn!(source = %name, error = %e, failures, "Fetch error");
                return SourceOutcome::Failed {
                    failures,
                    reason: e.to_string(),
                };
            }
        };

        if self.settings.reset_failures_on_success {
            state.reset_failures(name);
        }

        let (mode, entries) = self.normalizer.parse_tolerant(&body);
        if mode == ParseMode::Tolerant {
            tracing::warn!(source = %name, entries = entries.len(), "Malformed feed, used tolerant scan");
        } else {
            tracing::debug!(source = %name, entries = entries.len(), "Feed parsed");
        }

        let count = entries.len();
        report.batches.push(SourceBatch {
            source: source.clone(),
            entries,
        });

        SourceOutcome::Fetched {
            entries: count,
            mode,
        }
    }
}
