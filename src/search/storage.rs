//! Durable key-value storage for client-side state
//!
//! Values are opaque strings, mirroring browser local storage. The file-backed
//! store keeps every key in one JSON object and writes it atomically.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// String key-value storage
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Write a value, replacing any existing one
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    /// Remove a key; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store scoped to a single session
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        if !self.file_path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.file_path).with_context(|| {
            format!("Failed to read store file: {}", self.file_path.display())
        })?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse store file: {}", self.file_path.display()))
    }

    /// Atomic write: write temp file, then rename over the target
    #[instrument(name = "kv_store_write", skip(self, values))]
    fn write_all(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json = serde_json::to_string(values).context("Failed to serialize store")?;
        let temp_path = self.file_path.with_extension("json.tmp");

        std::fs::write(&temp_path, &json).with_context(|| {
            format!("Failed to write temp store file: {}", temp_path.display())
        })?;
        std::fs::rename(&temp_path, &self.file_path).with_context(|| {
            format!("Failed to rename temp file to {}", self.file_path.display())
        })?;

        debug!(
            path = %self.file_path.display(),
            key_count = values.len(),
            bytes = json.len(),
            "Saved key-value store (atomic)"
        );
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        // A corrupt file is replaced rather than blocking every future write
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(e) => {
                info!(error = %e, "Discarding unreadable store file");
                HashMap::new()
            }
        };
        values.insert(key.to_string(), value);
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut values = self.read_all().unwrap_or_default();
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("store.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonFileStore::new(&path);
        store.set("a", "1".to_string()).unwrap();
        store.set("b", "2".to_string()).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_corrupt_file_is_error_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.get("a").is_err());
    }

    #[test]
    fn test_file_store_set_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{{{{").unwrap();

        let mut store = JsonFileStore::new(&path);
        store.set("a", "1".to_string()).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_file_store_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("store.json"));
        store.set("a", "1".to_string()).unwrap();
        store.remove("a").unwrap();
        store.remove("never-set").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }
}
