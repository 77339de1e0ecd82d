//! Theme preference management.
//!
//! The engine does not own any colors or styling — theming internals belong to
//! the host — but the light/dark preference is user state that must survive
//! reloads, so it lives here next to the rest of the persisted state. The
//! stored value is the plain string `light` or `dark` under its own storage
//! key.

use crate::domain::error::Result;
use crate::storage::{KeyValueStore, THEME_KEY};

/// The user's theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light color scheme (default).
    #[default]
    Light,
    /// Dark color scheme.
    Dark,
}

impl ThemeMode {
    /// The persisted string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a persisted string form.
    ///
    /// Returns `None` for anything other than `light` or `dark`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Loads the preference from durable storage.
    ///
    /// An absent or malformed value falls back to [`ThemeMode::Light`] (fail
    /// open), with a warning for the malformed case.
    #[must_use]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(THEME_KEY) {
            None => Self::Light,
            Some(raw) => Self::from_name(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unrecognized stored theme; falling back to light");
                Self::Light
            }),
        }
    }

    /// Persists the preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn save(self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(THEME_KEY, self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn toggle_round_trips_through_storage() {
        let mut store = MemoryStore::default();
        let mode = ThemeMode::load(&store);
        assert_eq!(mode, ThemeMode::Light);

        let toggled = mode.toggled();
        toggled.save(&mut store).unwrap();
        assert_eq!(ThemeMode::load(&store), ThemeMode::Dark);
    }

    #[test]
    fn malformed_stored_value_falls_back_to_light() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(ThemeMode::load(&store), ThemeMode::Light);
    }
}
