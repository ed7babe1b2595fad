use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::normalizer::{DEFAULT_ENTRIES_PER_SOURCE, DEFAULT_MAX_ITEMS};

/// The two kinds of run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// New items packed and forwarded to the writer API.
    Digest,
    /// New items enriched with full text and pushed to the table store.
    Research,
}

impl Job {
    pub fn label(&self) -> &'static str {
        match self {
            Job::Digest => "digest",
            Job::Research => "research",
        }
    }
}

/// Per-job settings. Unset paths fall back to the job's own defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub feeds_file: Option<PathBuf>,
    pub state_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub file_prefix: Option<String>,

    /// Polling window written into each pack (informational)
    pub window_hours: u32,

    /// New items accepted per run (default: 200)
    pub max_items: usize,

    /// Entries read from each feed (default: 200)
    pub entries_per_source: usize,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            feeds_file: None,
            state_file: None,
            output_dir: None,
            file_prefix: None,
            window_hours: 6,
            max_items: DEFAULT_MAX_ITEMS,
            entries_per_source: DEFAULT_ENTRIES_PER_SOURCE,
        }
    }
}

/// Resolved file locations for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPaths {
    pub feeds_file: PathBuf,
    pub state_file: PathBuf,
    pub output_dir: PathBuf,
    pub file_prefix: String,
}

impl JobConfig {
    pub fn paths(&self, job: Job) -> JobPaths {
        let (feeds, state, output) = match job {
            Job::Digest => ("feeds.txt", "state.json", "digests"),
            Job::Research => ("research/feeds.txt", "research/state.json", "research/output"),
        };

        JobPaths {
            feeds_file: self.feeds_file.clone().unwrap_or_else(|| feeds.into()),
            state_file: self.state_file.clone().unwrap_or_else(|| state.into()),
            output_dir: self.output_dir.clone().unwrap_or_else(|| output.into()),
            file_prefix: self
                .file_prefix
                .clone()
                .unwrap_or_else(|| job.label().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_per_job() {
        let config = JobConfig::default();

        let digest = config.paths(Job::Digest);
        assert_eq!(digest.feeds_file, PathBuf::from("feeds.txt"));
        assert_eq!(digest.output_dir, PathBuf::from("digests"));
        assert_eq!(digest.file_prefix, "digest");

        let research = config.paths(Job::Research);
        assert_eq!(research.state_file, PathBuf::from("research/state.json"));
        assert_eq!(research.file_prefix, "research");
    }
}
