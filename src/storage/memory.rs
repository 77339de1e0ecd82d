//! In-memory key-value store.
//!
//! Non-durable [`KeyValueStore`] backend for tests and hosts that manage
//! durability elsewhere (a browser host, for instance, bridges `set` straight
//! to its own storage API and only needs the trait's shape).

use std::collections::HashMap;

use crate::domain::error::Result;
use crate::storage::backend::KeyValueStore;

/// HashMap-backed store with no durability.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
