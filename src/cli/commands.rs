use crate::app::{AppContext, FeedpackError, Result};
use crate::config::Job;
use crate::domain::FeedSource;
use crate::pipeline::{self, Delivery, RunSummary};
use crate::store::StateStore;

/// Run a job once and print its summary.
pub async fn run_job(ctx: &AppContext, job: Job, strict: bool) -> Result<()> {
    let summary = pipeline::run(ctx, job).await?;
    print_summary(&summary);

    if strict && !summary.is_clean() {
        return Err(FeedpackError::Other(format!(
            "{} run finished with {} failed sources, delivery: {}",
            job.label(),
            summary.source_failures,
            describe(&summary.delivery)
        )));
    }
    Ok(())
}

fn describe(delivery: &Delivery) -> String {
    match delivery {
        Delivery::Skipped => "skipped".to_string(),
        Delivery::Delivered(msg) => format!("ok {msg}"),
        Delivery::Failed(msg) => format!("failed {msg}"),
    }
}

pub fn print_summary(summary: &RunSummary) {
    println!("new_items: {}", summary.new_items);
    if summary.job == Job::Research {
        println!("partial_content: {}", summary.partial_content);
    }
    println!("saved: {}", summary.output.display());
    println!("posted: {}", describe(&summary.delivery));
    if summary.source_failures > 0 {
        println!(
            "failed sources: {} of {}",
            summary.source_failures, summary.sources
        );
    }
    for name in &summary.invalid_sources {
        println!("invalid source: {}", name);
    }
}

pub fn list_sources(ctx: &AppContext, job: Job) -> Result<()> {
    let paths = ctx.config.job(job).paths(job);
    let sources = FeedSource::load(&paths.feeds_file)?;

    if sources.is_empty() {
        println!("No sources in {}", paths.feeds_file.display());
        return Ok(());
    }

    let state = ctx.state_store(job).load();
    for source in sources {
        let failures = state.fail_count(source.name());
        let marker = if failures >= ctx.config.fetch.failure_threshold {
            "!"
        } else {
            " "
        };
        println!("{} {} ({} failures)\n  {}", marker, source.name(), failures, source.url);
    }
    println!("\n{} ids remembered", state.len());

    Ok(())
}
