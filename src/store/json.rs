use std::fs;
use std::path::{Path, PathBuf};

use crate::app::Result;
use crate::domain::{SeenState, DEFAULT_SEEN_CAP};
use crate::store::StateStore;

/// Seen-set persisted as a pretty-printed JSON file.
pub struct JsonStateStore {
    path: PathBuf,
    cap: usize,
}

impl JsonStateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_cap(path, DEFAULT_SEEN_CAP)
    }

    pub fn with_cap<P: AsRef<Path>>(path: P, cap: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cap,
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> SeenState {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "No prior state, starting fresh");
                return SeenState::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable state file, starting fresh");
                SeenState::new()
            }
        }
    }

    fn save(&self, state: &mut SeenState) -> Result<()> {
        state.trim(self.cap);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), seen = state.len(), "State saved");
        Ok(())
    }
}
