//! Durable key-value storage abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over the
//! host's durable per-user storage. The engine uses it for exactly two keys:
//! the favorites id list and the theme preference. The trait is deliberately
//! minimal — two operations, string values — matching what the engine actually
//! needs rather than a generic persistence API.

use crate::domain::error::Result;

/// Storage key holding the JSON-encoded array of favorite venue ids.
pub const FAVORITES_KEY: &str = "pinfinder.favorites";

/// Storage key holding the theme preference (`light` or `dark`).
pub const THEME_KEY: &str = "pinfinder.theme";

/// Abstraction over durable per-user key-value storage.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one JSON file with
///   atomic writes (default for native hosts)
/// - [`MemoryStore`](crate::storage::MemoryStore): non-durable, for tests and
///   ephemeral hosts
///
/// Reads are infallible by contract: a backend that cannot read a key reports
/// it as absent, which callers treat as empty state (fail open). Writes are
/// fallible and are reported to the caller, which decides whether the failure
/// is worth surfacing.
pub trait KeyValueStore: Send {
    /// Returns the stored value for `key`, or `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, durably, before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
