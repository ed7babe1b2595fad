use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SEEN_CAP: usize = 5000;

/// Cross-run state: the ids already emitted plus per-source failure counters.
///
/// `seen` keeps insertion order so trimming drops the oldest ids first.
/// `alerted` holds the sources already reported as invalid, so the alert
/// is raised once per failure streak.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StateFile", into = "StateFile")]
pub struct SeenState {
    seen: Vec<String>,
    index: HashSet<String>,
    fail_counts: BTreeMap<String, u32>,
    alerted: BTreeSet<String>,
}

/// On-disk shape. `fail_counts` and `alerted` are absent in older state files.
#[derive(Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    seen: Vec<String>,
    #[serde(default)]
    fail_counts: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    alerted: BTreeSet<String>,
}

impl From<StateFile> for SeenState {
    fn from(file: StateFile) -> Self {
        let mut state = SeenState {
            fail_counts: file.fail_counts,
            alerted: file.alerted,
            ..Default::default()
        };
        for id in file.seen {
            state.insert(id);
        }
        state
    }
}

impl From<SeenState> for StateFile {
    fn from(state: SeenState) -> Self {
        StateFile {
            seen: state.seen,
            fail_counts: state.fail_counts,
            alerted: state.alerted,
        }
    }
}

impl SeenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// Append an id. Returns false if it was already present; its position
    /// is left unchanged in that case.
    pub fn insert(&mut self, id: String) -> bool {
        if !self.index.insert(id.clone()) {
            return false;
        }
        self.seen.push(id);
        true
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Ids in insertion order, oldest first.
    pub fn ids(&self) -> &[String] {
        &self.seen
    }

    /// Keep only the `cap` most recently inserted ids.
    pub fn trim(&mut self, cap: usize) {
        if self.seen.len() <= cap {
            return;
        }
        let excess = self.seen.len() - cap;
        for id in self.seen.drain(..excess) {
            self.index.remove(&id);
        }
    }

    pub fn fail_count(&self, source: &str) -> u32 {
        self.fail_counts.get(source).copied().unwrap_or(0)
    }

    /// Bump the consecutive-failure counter and return the new value.
    pub fn record_failure(&mut self, source: &str) -> u32 {
        let count = self.fail_counts.entry(source.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn reset_failures(&mut self, source: &str) {
        self.fail_counts.remove(source);
        self.alerted.remove(source);
    }

    /// Record that `source` was reported as invalid. Returns false if it
    /// already was.
    pub fn mark_alerted(&mut self, source: &str) -> bool {
        self.alerted.insert(source.to_string())
    }

    pub fn fail_counts(&self) -> &BTreeMap<String, u32> {
        &self.fail_counts
    }
}
