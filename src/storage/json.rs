//! JSON file-based key-value store.
//!
//! A simple, human-readable [`KeyValueStore`] backend holding all keys in one
//! JSON file. Writes go through a temp-file-and-rename sequence so the file is
//! never left half-written, and every `set` persists before returning — the
//! favorites contract requires durability to be synchronous, not batched.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) — the file is loaded into memory once at construction
//! - **Write**: O(n) — the whole map is serialized per mutation
//! - **Best for**: a handful of small keys, infrequent writes

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::{PinfinderError, Result};
use crate::storage::backend::KeyValueStore;

/// On-disk container format.
///
/// A versioned wrapper around the key map, leaving room for future migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Version of the storage format.
    version: u32,

    /// All stored keys. A `BTreeMap` keeps the file diff-friendly.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The entire key map is kept in memory and rewritten on each mutation.
///
/// # Startup Behavior
///
/// A missing file starts empty. An unreadable or unparsable file ALSO starts
/// empty (with a warning): malformed persisted state must never block
/// application start.
pub struct JsonFileStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on creation.
    data: StoreData,
}

impl JsonFileStore {
    /// Creates or opens a JSON store at `file_path`.
    ///
    /// Parent directories are created automatically. Existing content that
    /// fails to parse is discarded in favor of an empty store — fail open.
    ///
    /// # Errors
    ///
    /// Returns an error only if the parent directory cannot be created.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, path = ?file_path, "discarding malformed store file");
                StoreData::default()
            })
        } else {
            StoreData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "store initialized");

        Ok(Self { file_path, data })
    }

    fn load_from_file(path: &PathBuf) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| PinfinderError::Storage(format!("failed to parse JSON: {e}")))
    }

    /// Writes the current map to disk atomically (temp file + rename).
    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| PinfinderError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key).entered();

        self.data.entries.insert(key.to_string(), value.to_string());
        self.save_to_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = JsonFileStore::new(path.clone()).unwrap();
        store.set("pinfinder.theme", "dark").unwrap();
        drop(store);

        let reopened = JsonFileStore::new(path).unwrap();
        assert_eq!(reopened.get("pinfinder.theme"), Some("dark".to_string()));
        assert_eq!(reopened.get("missing"), None);
    }

    #[test]
    fn malformed_file_starts_empty_instead_of_failing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json at all").unwrap();

        let store = JsonFileStore::new(path).unwrap();
        assert_eq!(store.get("pinfinder.favorites"), None);
    }

    #[test]
    fn writes_replace_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = JsonFileStore::new(path).unwrap();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k"), Some("two".to_string()));
    }
}
