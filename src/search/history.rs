//! Recent-search history
//!
//! A capped, deduplicated, most-recent-first list of free-text strings kept
//! under a fixed namespace key in a [`KeyValueStore`]. The stored value is a
//! JSON array of strings.

use anyhow::{Context, Result};
use tracing::{debug, instrument, warn};

use super::storage::{JsonFileStore, KeyValueStore};
use crate::config::{Config, DEFAULT_HISTORY_LIMIT, SEARCH_HISTORY_KEY};

/// Persisted search history backed by any key-value store
#[derive(Debug)]
pub struct SearchHistory<S: KeyValueStore> {
    store: S,
    key: String,
    limit: usize,
    entries: Vec<String>,
}

impl<S: KeyValueStore> SearchHistory<S> {
    /// History under the default key with the default cap of 12
    pub fn new(store: S) -> Self {
        Self::with_limit(store, DEFAULT_HISTORY_LIMIT)
    }

    /// History with a smaller cap; `limit` is clamped to 1..=12
    pub fn with_limit(store: S, limit: usize) -> Self {
        SearchHistory {
            store,
            key: SEARCH_HISTORY_KEY.to_string(),
            limit: limit.clamp(1, DEFAULT_HISTORY_LIMIT),
            entries: Vec::new(),
        }
    }

    /// Entries as of the last load/save/clear
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Read history from storage.
    ///
    /// Absent or corrupt storage yields an empty list; this never fails.
    /// Stored entries are trimmed, blanks and repeats are dropped (first
    /// occurrence wins) and the result is cut to the cap.
    #[instrument(name = "history_load", skip(self))]
    pub fn load(&mut self) -> Vec<String> {
        self.entries = match self.read_stored() {
            Ok(list) => normalize(list, self.limit),
            Err(e) => {
                warn!(error = %e, key = %self.key, "Search history unreadable, starting empty");
                Vec::new()
            }
        };
        debug!(entry_count = self.entries.len(), "Loaded search history");
        self.entries.clone()
    }

    /// Record `text` as the most recent search.
    ///
    /// Empty or whitespace-only text is ignored. The trimmed text replaces any
    /// equal entry and moves to the front; the list is cut to the cap. The
    /// in-memory list is updated even when persisting fails.
    #[instrument(name = "history_save", skip(self))]
    pub fn save(&mut self, text: &str) -> Result<()> {
        let normalized = text.trim();
        if normalized.is_empty() {
            return Ok(());
        }

        // Start from storage so concurrent sessions don't clobber each other
        let mut list = self.read_stored().unwrap_or_default();
        list.insert(0, normalized.to_string());
        self.entries = normalize(list, self.limit);

        let json = serde_json::to_string(&self.entries).context("Failed to serialize history")?;
        self.store
            .set(&self.key, json)
            .with_context(|| format!("Failed to persist search history '{}'", self.key))?;

        debug!(entry_count = self.entries.len(), "Saved search history");
        Ok(())
    }

    /// Empty the persisted history
    #[instrument(name = "history_clear", skip(self))]
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.store
            .remove(&self.key)
            .with_context(|| format!("Failed to clear search history '{}'", self.key))
    }

    fn read_stored(&self) -> Result<Vec<String>> {
        match self.store.get(&self.key)? {
            Some(raw) => serde_json::from_str(&raw).context("Failed to parse search history"),
            None => Ok(Vec::new()),
        }
    }
}

impl SearchHistory<JsonFileStore> {
    /// On-disk history at the configured path with the configured cap
    pub fn from_config(config: &Config) -> Self {
        Self::with_limit(
            JsonFileStore::new(config.get_history_path()),
            config.get_history_limit(),
        )
    }
}

fn normalize(list: Vec<String>, limit: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(limit);
    for entry in list {
        let trimmed = entry.trim();
        if trimmed.is_empty() || out.iter().any(|kept| kept == trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
        if out.len() == limit {
            break;
        }
    }
    out
}
