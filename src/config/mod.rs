//! Configuration management for feedpack.
//!
//! Configuration is read from `~/.config/feedpack/config.toml` (or the path
//! given with `--config`). If the default file doesn't exist, one with
//! comments is created. Environment variables (optionally from `.env`)
//! override the remote-endpoint settings.

pub mod env;
pub mod job;

pub use job::{Job, JobConfig, JobPaths};

use crate::extractor::ReaderProxyConfig;
use crate::fetcher::{Jitter, PollerSettings, UserAgentPool};
use crate::sink::{ForwardConfig, SiteConfig, TableConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub digest: JobConfig,
    pub research: JobConfig,
    pub fetch: FetchConfig,
    pub extract: ReaderProxyConfig,
    pub state: StateConfig,
    pub forward: ForwardConfig,
    pub table: TableConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds (default: 20)
    pub timeout_secs: u64,

    /// Pause between sources, in milliseconds
    pub jitter_min_ms: u64,
    pub jitter_max_ms: u64,

    /// Consecutive failures before a source is reported invalid (default: 3)
    pub failure_threshold: u32,

    /// Clear the failure counter when a source fetches fine again
    pub reset_failures_on_success: bool,

    /// User-Agent pool; empty uses the built-in browser strings
    pub user_agents: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            jitter_min_ms: 1000,
            jitter_max_ms: 3000,
            failure_threshold: 3,
            reset_failures_on_success: false,
            user_agents: Vec::new(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn user_agent_pool(&self) -> UserAgentPool {
        UserAgentPool::new(self.user_agents.clone())
    }

    pub fn poller_settings(&self) -> PollerSettings {
        PollerSettings {
            failure_threshold: self.failure_threshold,
            reset_failures_on_success: self.reset_failures_on_success,
            jitter: Jitter::from_millis(self.jitter_min_ms, self.jitter_max_ms),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Maximum number of remembered ids (default: 5000)
    pub seen_cap: usize,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            seen_cap: crate::domain::DEFAULT_SEEN_CAP,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// and created with commented defaults on first use. Missing fields use
    /// default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/feedpack/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("feedpack").join("config.toml"))
    }

    pub fn job(&self, job: Job) -> &JobConfig {
        match job {
            Job::Digest => &self.digest,
            Job::Research => &self.research,
        }
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        tracing::info!(path = %path.display(), "Created default config");
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# feedpack configuration
#
# Relative paths are resolved against the working directory of the run.
# WRITER_API_URL, WRITER_API_KEY, TABLE_APP_ID, TABLE_APP_SECRET,
# TABLE_APP_TOKEN and TABLE_ID (environment or .env) override the
# [forward] and [table] sections.

[digest]
# feeds_file = "feeds.txt"
# state_file = "state.json"
# output_dir = "digests"
# file_prefix = "digest"
window_hours = 6
max_items = 200
entries_per_source = 200

[research]
# feeds_file = "research/feeds.txt"
# state_file = "research/state.json"
# output_dir = "research/output"
# file_prefix = "research"
window_hours = 6
max_items = 200
entries_per_source = 200

[fetch]
timeout_secs = 20
# Random pause between sources (milliseconds)
jitter_min_ms = 1000
jitter_max_ms = 3000
# 404s in a row before a source is reported invalid
failure_threshold = 3
reset_failures_on_success = false

[extract]
proxy_base = "https://r.jina.ai"
timeout_secs = 30
return_format = "markdown"
target_selector = "body"
# Random pause between extracted articles (milliseconds)
jitter_min_ms = 5000
jitter_max_ms = 10000

[state]
seen_cap = 5000

[forward]
timeout_secs = 60

[table]
base_url = "https://open.feishu.cn"

[site]
# data_file = "docs/data.json"
max_items = 500
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config =
            toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.fetch.timeout_secs, 20);
        assert_eq!(config.digest.window_hours, 6);
        assert_eq!(config.extract.proxy_base, "https://r.jina.ai");
        assert_eq!(config.state.seen_cap, 5000);
        assert!(config.forward.url.is_none());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[fetch]
failure_threshold = 5

[research]
output_dir = "out/research"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        // Custom value
        assert_eq!(config.fetch.failure_threshold, 5);
        assert_eq!(
            config.research.paths(Job::Research).output_dir,
            PathBuf::from("out/research")
        );
        // Default value
        assert_eq!(config.fetch.jitter_max_ms, 3000);
        assert_eq!(
            config.research.paths(Job::Research).state_file,
            PathBuf::from("research/state.json")
        );
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.fetch.failure_threshold, 3);
        assert!(!config.fetch.reset_failures_on_success);
        assert_eq!(config.digest.max_items, 200);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feedpack.toml");
        fs::write(&path, "[forward]\nurl = \"https://writer.example/api\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.forward.url.as_deref(), Some("https://writer.example/api"));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_poller_settings_from_fetch_config() {
        let fetch = FetchConfig {
            failure_threshold: 4,
            reset_failures_on_success: true,
            jitter_min_ms: 0,
            jitter_max_ms: 0,
            ..Default::default()
        };
        let settings = fetch.poller_settings();
        assert_eq!(settings.failure_threshold, 4);
        assert!(settings.reset_failures_on_success);
        assert_eq!(settings.jitter, Jitter::none());
    }
}
