//! # feedpack
//!
//! Polls a fixed set of RSS/Atom feeds, drops entries already emitted by an
//! earlier run and packs the new ones into a JSON batch.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Seen-set filter → (Extractor) → Pack → Sinks
//!                 ↑                                          |
//!                 └──────── SeenState (load … save) ─────────┘
//! ```
//!
//! Two jobs share the pipeline:
//!
//! - `digest`: new items written to `digests/digest-YYYYMMDD-HHMM.json`
//!   and POSTed to the writer API when `WRITER_API_URL` is set.
//! - `research`: new items enriched with full article markdown, written to
//!   `research/output/research-YYYYMMDD-HHMM.json` and pushed to the table
//!   store when its credentials are set.
//!
//! ## Quick Start
//!
//! ```bash
//! # One digest run
//! feedpack digest
//!
//! # Full-text research run
//! feedpack research
//!
//! # Every six hours until Ctrl-C
//! feedpack watch --interval 6h
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// extractor and sinks from a [`Config`](config::Config).
pub mod app;

/// Configuration management.
///
/// Loads from `~/.config/feedpack/config.toml`, with environment overrides
/// for the writer API and table store credentials.
pub mod config;

/// Foreground scheduler for `feedpack watch`.
pub mod daemon;

/// Command-line interface using clap.
pub mod cli;

/// Core domain models.
///
/// - [`FeedSource`](domain::FeedSource): a configured feed
/// - [`RawEntry`](domain::RawEntry): an entry before normalization
/// - [`Item`](domain::Item): a normalized entry with a SHA-256 id
/// - [`SeenState`](domain::SeenState): bounded seen-set and failure counters
/// - [`Pack`](domain::Pack): one run's output batch
pub mod domain;

/// Full-text extraction through a reader proxy.
pub mod extractor;

/// HTTP fetching and the sequential source poller.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`Poller`](fetcher::Poller): walks sources one at a time with jitter
pub mod fetcher;

/// Feed parsing and normalization.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0 and JSON Feed 1.0 into
/// [`RawEntry`](domain::RawEntry) values, with a tolerant scan for broken
/// documents, then into [`Item`](domain::Item)s.
pub mod normalizer;

/// Job orchestration.
pub mod pipeline;

/// Output sinks: pack files, writer API, table store, site data.
pub mod sink;

/// Seen-set persistence.
///
/// - [`StateStore`](store::StateStore): load/save interface
/// - [`JsonStateStore`](store::JsonStateStore): JSON file implementation
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
