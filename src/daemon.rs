//! Foreground scheduler: repeats a job on a fixed interval until Ctrl-C or
//! SIGTERM, so feedpack can run without cron.

use std::time::Duration;

use chrono::Utc;
use tokio::time::{interval, MissedTickBehavior};

use crate::app::AppContext;
use crate::cli::commands::print_summary;
use crate::config::Job;
use crate::pipeline;

#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Seconds between runs (default: 21600 = 6 hours)
    pub interval_secs: u64,
    /// Whether to run immediately on start
    pub run_on_start: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: 6 * 3600,
            run_on_start: true,
        }
    }
}

impl WatchConfig {
    /// Parse interval string like "1h", "30m", "6h", "1d"
    pub fn parse_interval(s: &str) -> Result<u64, String> {
        let s = s.trim().to_lowercase();

        let (digits, unit) = match s.char_indices().last() {
            Some((idx, c)) if c.is_ascii_alphabetic() => (&s[..idx], Some(c)),
            _ => (s.as_str(), None),
        };
        let value: u64 = digits
            .parse()
            .map_err(|_| format!("Invalid interval: {}. Use format like '1h', '30m', '1d'", s))?;

        let multiplier = match unit {
            None | Some('s') => 1,
            Some('m') => 60,
            Some('h') => 3600,
            Some('d') => 86400,
            Some(other) => return Err(format!("Unknown interval unit '{}' in {}", other, s)),
        };
        let secs = value
            .checked_mul(multiplier)
            .ok_or_else(|| format!("Interval too large: {}", s))?;

        if secs == 0 {
            return Err("Interval must be greater than zero".to_string());
        }
        Ok(secs)
    }

    /// Format interval for display
    pub fn format_interval(secs: u64) -> String {
        if secs >= 86400 && secs % 86400 == 0 {
            format!("{}d", secs / 86400)
        } else if secs >= 3600 && secs % 3600 == 0 {
            format!("{}h", secs / 3600)
        } else if secs >= 60 && secs % 60 == 0 {
            format!("{}m", secs / 60)
        } else {
            format!("{}s", secs)
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {},
                    _ = tokio::signal::ctrl_c() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, listening for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Run `job` every `config.interval_secs` until interrupted. A failed run
/// is logged and the loop keeps going.
pub async fn watch(ctx: &AppContext, job: Job, config: WatchConfig) {
    tracing::info!(
        job = job.label(),
        interval = %WatchConfig::format_interval(config.interval_secs),
        "Watch started"
    );

    let mut timer = interval(Duration::from_secs(config.interval_secs));
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    if !config.run_on_start {
        timer.tick().await; // Skip the first immediate tick
    }

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = timer.tick() => {}
        }

        let start = Utc::now();
        tokio::select! {
            _ = &mut shutdown => {
                tracing::warn!(job = job.label(), "Interrupted mid-run, state not saved");
                break;
            }
            result = pipeline::run(ctx, job) => match result {
                Ok(summary) => {
                    print_summary(&summary);
                    let elapsed = Utc::now().signed_duration_since(start);
                    tracing::info!(
                        job = job.label(),
                        new_items = summary.new_items,
                        elapsed_secs = elapsed.num_milliseconds() as f64 / 1000.0,
                        "Scheduled run complete"
                    );
                }
                Err(e) => tracing::error!(job = job.label(), error = %e, "Scheduled run failed"),
            }
        }
    }

    tracing::info!("Watch shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval() {
        assert_eq!(WatchConfig::parse_interval("1h").unwrap(), 3600);
        assert_eq!(WatchConfig::parse_interval("30m").unwrap(), 1800);
        assert_eq!(WatchConfig::parse_interval("1d").unwrap(), 86400);
        assert_eq!(WatchConfig::parse_interval("90s").unwrap(), 90);
        assert_eq!(WatchConfig::parse_interval("3600").unwrap(), 3600);
        assert_eq!(WatchConfig::parse_interval(" 6H ").unwrap(), 21600);
        assert!(WatchConfig::parse_interval("invalid").is_err());
        assert!(WatchConfig::parse_interval("5w").is_err());
        assert!(WatchConfig::parse_interval("0m").is_err());
        assert!(WatchConfig::parse_interval("999999999999999d").is_err());
        assert!(WatchConfig::parse_interval("99999999999999999999").is_err());
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(WatchConfig::format_interval(3600), "1h");
        assert_eq!(WatchConfig::format_interval(1800), "30m");
        assert_eq!(WatchConfig::format_interval(86400), "1d");
        assert_eq!(WatchConfig::format_interval(90), "90s");
        assert_eq!(WatchConfig::format_interval(21600), "6h");
    }
}
