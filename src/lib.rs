//! Pinfinder: a view-state synchronization engine for a venue-catalog map browser.
//!
//! Pinfinder keeps multiple simultaneous presentations of one venue catalog —
//! map markers, list panels, card grids, search suggestions, and a favorites
//! set — mutually consistent as the user filters, searches, selects, and
//! bookmarks:
//!
//! - Exactly one authoritative selection at a time
//! - Markers always mirroring the active filter, without recreating handles
//!   that survive a filter change
//! - Favorites persisted synchronously and surviving reloads
//! - Remote search with a last-submitted-wins guard against out-of-order
//!   completions
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host Runtime (map widget, KV file, network)        │  ← Events in, Actions out
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!      │           │           │           │
//! ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐
//! │ Domain  │ │ Map     │ │ Search  │ │ Storage │
//! │ (domain)│ │ (map/)  │ │(search/)│ │(storage)│
//! │ - Venue │ │ - Trait │ │ - Local │ │ - Trait │
//! │ - Filter│ │ - Sync  │ │ - Remote│ │ - JSON  │
//! └─────────┘ └─────────┘ └─────────┘ └─────────┘
//! ```
//!
//! The map widget, the durable key-value store, and the geocoding transport
//! are external collaborators: the engine reaches the first two through the
//! [`MapSurface`](map::MapSurface) and [`KeyValueStore`](storage::KeyValueStore)
//! traits and the third through the [`Action::Geocode`](app::Action::Geocode) /
//! [`Event::GeocodeCompleted`](app::Event::GeocodeCompleted) pair.
//!
//! # Concurrency Model
//!
//! Single-threaded and event-driven. All state mutations happen on one logical
//! thread, in the order events are delivered. The only suspension point is the
//! in-flight geocoding request, bridged by the sequence-guarded event pair;
//! there is no explicit cancellation, only last-submitted-wins discarding.
//!
//! # Example
//!
//! ```no_run
//! use pinfinder::{
//!     app::{handle_event, AppState, Event},
//!     domain::sample_venues,
//!     map::{MapSurface, MarkerHandle, MarkerStyle},
//!     domain::Coordinates,
//!     storage::JsonFileStore,
//!     EngineConfig,
//! };
//!
//! struct MySurface;
//! impl MapSurface for MySurface {
//!     fn add_marker(&mut self, _: Coordinates, _: MarkerStyle) -> MarkerHandle { MarkerHandle(0) }
//!     fn remove_marker(&mut self, _: MarkerHandle) {}
//!     fn set_marker_style(&mut self, _: MarkerHandle, _: MarkerStyle) {}
//!     fn set_view(&mut self, _: Coordinates, _: u8) {}
//! }
//!
//! let config = EngineConfig::default();
//! pinfinder::observability::init_tracing(&config);
//!
//! let store = JsonFileStore::new("pinfinder.json".into())?;
//! let mut state = AppState::new(sample_venues(), Box::new(store), config);
//! let mut surface = MySurface;
//!
//! let (redraw, actions) = handle_event(&mut state, &mut surface, &Event::Initialize)?;
//! if redraw {
//!     let _viewmodel = state.compute_viewmodel();
//!     // hand the view model to the renderer
//! }
//! for _action in actions {
//!     // execute host side effects (geocode requests, deep links)
//! }
//! # Ok::<(), pinfinder::domain::PinfinderError>(())
//! ```

pub mod app;
pub mod domain;
pub mod filter;
pub mod map;
pub mod notify;
pub mod observability;
pub mod search;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, SelectionState, View};
pub use domain::{
    sample_venues, CatalogStore, Coordinates, Machine, PinfinderError, Result, Venue, VenueId,
};
pub use filter::FilterCriterion;
pub use map::{MapSurface, MarkerHandle, MarkerStyle, MarkerSync};
pub use search::{GeocodeHit, GeocodeOutcome, GeocodeRequest, SearchResolver};
pub use storage::{FavoritesStore, JsonFileStore, KeyValueStore, MemoryStore};
pub use ui::{ThemeMode, ViewModel};

use serde::Deserialize;

/// Engine configuration.
///
/// Every field has a sensible default; hosts typically construct this with
/// [`EngineConfig::default`] or load overrides from a TOML file via
/// [`EngineConfig::from_toml_str`].
///
/// # TOML Format
///
/// ```toml
/// proximity_radius_deg = 0.5
/// notification_ttl_secs = 3
/// popular_queries = ["New York City", "Tokyo", "London", "Los Angeles"]
/// home_zoom = 2
/// venue_zoom = 15
/// search_zoom = 13
/// trace_level = "debug"
///
/// [home_position]
/// lat = 20.0
/// lng = 0.0
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Euclidean degree-space radius for the proximity scan around a
    /// resolved search point.
    pub proximity_radius_deg: f64,

    /// Seconds a notification stays visible.
    pub notification_ttl_secs: i64,

    /// Canned queries suggested when the search input is empty.
    pub popular_queries: Vec<String>,

    /// Initial map position.
    pub home_position: Coordinates,

    /// Zoom level for the initial world view.
    pub home_zoom: u8,

    /// Zoom level when centering on a chosen venue.
    pub venue_zoom: u8,

    /// Zoom level when centering on a resolved search point.
    pub search_zoom: u8,

    /// Tracing level for [`observability::init_tracing`].
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Falls back to the
    /// `RUST_LOG` environment variable, then `"info"`.
    pub trace_level: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            proximity_radius_deg: 0.5,
            notification_ttl_secs: 3,
            popular_queries: vec![
                "New York City".to_string(),
                "Tokyo".to_string(),
                "London".to_string(),
                "Los Angeles".to_string(),
            ],
            home_position: Coordinates { lat: 20.0, lng: 0.0 },
            home_zoom: 2,
            venue_zoom: 15,
            search_zoom: 13,
            trace_level: None,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from TOML text.
    ///
    /// Absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PinfinderError::Config`] if the text is not valid TOML or a
    /// present key has the wrong shape.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PinfinderError::Config(format!("invalid config: {e}")))
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_the_documented_contract() {
        let config = EngineConfig::default();
        assert!((config.proximity_radius_deg - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.notification_ttl_secs, 3);
        assert_eq!(config.popular_queries.len(), 4);
        assert_eq!(config.home_zoom, 2);
    }

    #[test]
    fn config_toml_overrides_only_present_keys() {
        let config = EngineConfig::from_toml_str(
            r#"
            proximity_radius_deg = 1.25
            trace_level = "debug"
            "#,
        )
        .unwrap();

        assert!((config.proximity_radius_deg - 1.25).abs() < f64::EPSILON);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.search_zoom, 13);
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let err = EngineConfig::from_toml_str("proximity_radius_deg = \"wide\"").unwrap_err();
        assert!(matches!(err, PinfinderError::Config(_)));
    }
}
