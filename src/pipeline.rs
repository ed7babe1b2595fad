//! One run of a job: load state, poll, dedupe, pack, sink, save state.
//!
//! Per-source, per-item and forwarding failures are logged and the run
//! carries on. Only a missing sources file, a failed pack write or a
//! failed state save abort it; in those cases state is not saved, so the
//! next run sees the same items again.

use std::path::PathBuf;

use chrono::Utc;

use crate::app::{AppContext, Result};
use crate::config::Job;
use crate::domain::{
    ContentStatus, FeedSource, Item, MaterialPack, ResearchPack, ResearchRecord, SeenState,
};
use crate::extractor::enrich;
use crate::store::StateStore;

/// Outcome of one forwarding attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// No endpoint configured.
    Skipped,
    Delivered(String),
    Failed(String),
}

impl Delivery {
    pub fn is_failure(&self) -> bool {
        matches!(self, Delivery::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub job: Job,
    pub sources: usize,
    pub source_failures: usize,
    pub invalid_sources: Vec<String>,
    pub new_items: usize,
    pub partial_content: usize,
    pub output: PathBuf,
    pub delivery: Delivery,
}

impl RunSummary {
    /// No source failed and nothing failed to forward.
    pub fn is_clean(&self) -> bool {
        self.source_failures == 0 && !self.delivery.is_failure()
    }
}

struct Collected {
    sources: usize,
    source_failures: usize,
    invalid_sources: Vec<String>,
    items: Vec<Item>,
}

async fn collect(ctx: &AppContext, job: Job, state: &mut SeenState) -> Result<Collected> {
    let paths = ctx.config.job(job).paths(job);
    let sources = FeedSource::load(&paths.feeds_file)?;
    tracing::info!(job = job.label(), sources = sources.len(), seen = state.len(), "Polling feeds");

    let report = ctx.poller(job).poll(&sources, state).await;
    let items = ctx
        .normalizer(job)
        .collect_new(&report.batches, state, ctx.config.job(job).max_items);

    tracing::info!(
        job = job.label(),
        entries = report.entry_count(),
        new_items = items.len(),
        failures = report.failures(),
        "Poll complete"
    );

    Ok(Collected {
        sources: sources.len(),
        source_failures: report.failures(),
        invalid_sources: report.alerts,
        items,
    })
}

/// Fetch new items, write the material pack and forward it.
pub async fn run_digest(ctx: &AppContext) -> Result<RunSummary> {
    let job = Job::Digest;
    let store = ctx.state_store(job);
    let mut state = store.load();

    let collected = collect(ctx, job, &mut state).await?;
    let now = Utc::now();
    let pack = MaterialPack::new(now, ctx.config.digest.window_hours, collected.items);

    let output = ctx.digest_writer(job).write(&pack, now)?;
    tracing::info!(path = %output.display(), items = pack.len(), "Digest saved");

    let delivery = match &ctx.writer_api {
        None => {
            tracing::info!("WRITER_API_URL not set, skipping forward");
            Delivery::Skipped
        }
        Some(api) => match api.forward(&pack).await {
            Ok(outcome) if outcome.ok => {
                tracing::info!(status = outcome.status, "Digest forwarded");
                Delivery::Delivered(format!("{} {}", outcome.status, outcome.detail))
            }
            Ok(outcome) => {
                tracing::error!(status = outcome.status, body = %outcome.detail, "Writer API rejected digest");
                Delivery::Failed(format!("{} {}", outcome.status, outcome.detail))
            }
            Err(e) => {
                tracing::error!(error = %e, "Writer API unreachable");
                Delivery::Failed(e.to_string())
            }
        },
    };

    if let Some(site) = &ctx.site {
        match site.merge(&pack.items) {
            Ok(count) => tracing::info!(items = count, "Site data updated"),
            Err(e) => tracing::warn!(error = %e, "Site data export failed"),
        }
    }

    store.save(&mut state)?;

    Ok(RunSummary {
        job,
        sources: collected.sources,
        source_failures: collected.source_failures,
        invalid_sources: collected.invalid_sources,
        new_items: pack.len(),
        partial_content: 0,
        output,
        delivery,
    })
}

/// Fetch new items, pull full text for each, write the research pack and
/// push it to the table store.
pub async fn run_research(ctx: &AppContext) -> Result<RunSummary> {
    let job = Job::Research;
    let store = ctx.state_store(job);
    let mut state = store.load();

    let collected = collect(ctx, job, &mut state).await?;
    let jitter = ctx.extract_jitter();

    let mut records: Vec<ResearchRecord> = Vec::with_capacity(collected.items.len());
    for (i, item) in collected.items.into_iter().enumerate() {
        if i > 0 {
            jitter.pause().await;
        }
        let extracted = ctx.extractor.extract(&item.link).await;
        records.push(enrich(item, extracted));
    }
    let partial_content = records
        .iter()
        .filter(|r| r.status == ContentStatus::PartialContent)
        .count();

    let now = Utc::now();
    let pack = ResearchPack::new(now, ctx.config.research.window_hours, records);
    let output = ctx.digest_writer(job).write(&pack, now)?;
    tracing::info!(path = %output.display(), items = pack.len(), partial_content, "Research pack saved");

    let delivery = match &ctx.table {
        None => Delivery::Skipped,
        Some(table) => match table.push(&pack.items).await {
            Ok(rows) => {
                tracing::info!(rows, "Research records pushed to table");
                Delivery::Delivered(format!("{rows} rows"))
            }
            Err(e) => {
                tracing::error!(error = %e, "Table push failed");
                Delivery::Failed(e.to_string())
            }
        },
    };

    store.save(&mut state)?;

    Ok(RunSummary {
        job,
        sources: collected.sources,
        source_failures: collected.source_failures,
        invalid_sources: collected.invalid_sources,
        new_items: pack.len(),
        partial_content,
        output,
        delivery,
    })
}

pub async fn run(ctx: &AppContext, job: Job) -> Result<RunSummary> {
    match job {
        Job::Digest => run_digest(ctx).await,
        Job::Research => run_research(ctx).await,
    }
}
