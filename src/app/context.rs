use std::sync::Arc;

use crate::app::Result;
use crate::config::{Config, Job};
use crate::extractor::{ContentExtractor, ReaderProxyExtractor};
use crate::fetcher::{Fetcher, HttpFetcher, Jitter, Poller};
use crate::normalizer::Normalizer;
use crate::sink::{DigestWriter, SiteExport, TableSink, WriterApi};
use crate::store::JsonStateStore;

/// Wires configuration to the fetcher, extractor and sinks.
pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub extractor: Arc<dyn ContentExtractor>,
    pub writer_api: Option<WriterApi>,
    pub table: Option<TableSink>,
    pub site: Option<SiteExport>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let user_agents = config.fetch.user_agent_pool();
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::with_options(
            config.fetch.timeout(),
            user_agents.clone(),
        )?);
        let extractor: Arc<dyn ContentExtractor> = Arc::new(ReaderProxyExtractor::new(
            config.extract.clone(),
            user_agents,
        )?);

        Self::with_components(config, fetcher, extractor)
    }

    pub fn with_components(
        config: Config,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        extractor: Arc<dyn ContentExtractor>,
    ) -> Result<Self> {
        let writer_api = WriterApi::from_config(&config.forward)?;
        let table = TableSink::from_config(&config.table)?;
        let site = SiteExport::from_config(&config.site);

        Ok(Self {
            config,
            fetcher,
            extractor,
            writer_api,
            table,
            site,
        })
    }

    pub fn normalizer(&self, job: Job) -> Normalizer {
        Normalizer::new().with_entries_per_source(self.config.job(job).entries_per_source)
    }

    pub fn poller(&self, job: Job) -> Poller {
        Poller::new(
            self.fetcher.clone(),
            self.normalizer(job),
            self.config.fetch.poller_settings(),
        )
    }

    pub fn state_store(&self, job: Job) -> JsonStateStore {
        let paths = self.config.job(job).paths(job);
        JsonStateStore::with_cap(paths.state_file, self.config.state.seen_cap)
    }

    pub fn digest_writer(&self, job: Job) -> DigestWriter {
        let paths = self.config.job(job).paths(job);
        DigestWriter::new(paths.output_dir, paths.file_prefix)
    }

    pub fn extract_jitter(&self) -> Jitter {
        Jitter::from_millis(
            self.config.extract.jitter_min_ms,
            self.config.extract.jitter_max_ms,
        )
    }
}
