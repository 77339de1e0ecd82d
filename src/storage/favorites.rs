//! The persistent favorites set.
//!
//! [`FavoritesStore`] holds the set of favorited venue ids. Membership testing
//! has no ordering requirement, but display iteration must be stable, so the
//! set is kept in insertion order. Every mutation persists the full
//! JSON-encoded id array through the [`KeyValueStore`] synchronously before
//! returning — no batching.
//!
//! Staleness policy: a persisted id whose venue has since left the catalog is
//! kept in the set, tolerated at load, and simply skipped when rendering. It is
//! never an error.
//!
//! Concurrency note: mutations here are a read-modify-persist sequence relying
//! on the engine's single-thread model. A multi-threaded port must make each
//! mutation an atomic critical section.

use crate::domain::error::{PinfinderError, Result};
use crate::domain::VenueId;
use crate::storage::backend::{KeyValueStore, FAVORITES_KEY};

/// Insertion-ordered set of favorited venue ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesStore {
    ids: Vec<VenueId>,
}

impl FavoritesStore {
    /// Loads the favorites set from durable storage.
    ///
    /// An absent key yields an empty set. So does unparsable content (with a
    /// warning): malformed persisted state fails open and never blocks
    /// application start.
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(FAVORITES_KEY) else {
            return Self::default();
        };

        match serde_json::from_str::<Vec<VenueId>>(&raw) {
            Ok(mut ids) => {
                ids.dedup();
                tracing::debug!(favorite_count = ids.len(), "favorites loaded");
                Self { ids }
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed favorites; starting empty");
                Self::default()
            }
        }
    }

    /// Adds a venue to the favorites and persists the set.
    ///
    /// Returns `true` if the set changed. Adding an already-present id is a
    /// no-op: no duplicate, no write, and the caller emits no notification.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the in-memory set is rolled back
    /// so memory and disk never disagree.
    pub fn add(&mut self, id: VenueId, store: &mut dyn KeyValueStore) -> Result<bool> {
        if self.is_favorite(id) {
            return Ok(false);
        }

        self.ids.push(id);
        if let Err(e) = self.persist(store) {
            self.ids.pop();
            return Err(e);
        }

        tracing::debug!(venue_id = %id, favorite_count = self.ids.len(), "favorite added");
        Ok(true)
    }

    /// Removes a venue from the favorites and persists the set.
    ///
    /// Returns `true` if the set changed. Removing an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the in-memory set is rolled back.
    pub fn remove(&mut self, id: VenueId, store: &mut dyn KeyValueStore) -> Result<bool> {
        let Some(position) = self.ids.iter().position(|&existing| existing == id) else {
            return Ok(false);
        };

        self.ids.remove(position);
        if let Err(e) = self.persist(store) {
            self.ids.insert(position, id);
            return Err(e);
        }

        tracing::debug!(venue_id = %id, favorite_count = self.ids.len(), "favorite removed");
        Ok(true)
    }

    /// Whether a venue is currently favorited.
    #[must_use]
    pub fn is_favorite(&self, id: VenueId) -> bool {
        self.ids.contains(&id)
    }

    /// All favorited ids in insertion order.
    ///
    /// May contain stale ids; rendering skips entries without a catalog venue.
    #[must_use]
    pub fn all(&self) -> &[VenueId] {
        &self.ids
    }

    /// Number of favorited ids, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let encoded = serde_json::to_string(&self.ids)
            .map_err(|e| PinfinderError::Storage(format!("failed to encode favorites: {e}")))?;
        store.set(FAVORITES_KEY, &encoded)
    }
}
