//! Application state container and view model computation.
//!
//! This module defines [`AppState`], the single home for every piece of
//! mutable session state, along with [`SelectionState`] and the projection
//! from state to display-ready view models.
//!
//! # Architecture
//!
//! Nothing here is ambient: what used to be free variables in a typical
//! front-end (current filter, current view, the marker list) are explicit
//! fields with well-defined mutation entry points, so each component can be
//! unit tested against a constructed state rather than a live rendering
//! surface.
//!
//! # State Components
//!
//! - **Catalog**: immutable venue list for the session
//! - **Favorites**: persistent venue-id set, mutated only through its store
//! - **Selection**: the single active venue, if any
//! - **Filters**: independent venue-level and machine-level criteria
//! - **Markers**: the reconciler owning the surface's marker handles
//! - **Resolver**: remote search state, result marker, proximity panel
//! - **Notifications**: auto-expiring status messages
//!
//! View models are computed on demand by [`AppState::compute_viewmodel`]; the
//! projection is pure, so calling it twice against unchanged state yields
//! identical (and `PartialEq`-equal) results.

use crate::domain::{CatalogStore, Venue, VenueId};
use crate::filter::{self, FilterCriterion};
use crate::map::{MapSurface, MarkerSync};
use crate::notify::{NotificationBus, NotificationKind};
use crate::search::{self, SearchResolver, Suggestion};
use crate::storage::{FavoritesStore, KeyValueStore};
use crate::ui::theme::ThemeMode;
use crate::ui::viewmodel::{
    FavoriteCard, MachineCard, NotificationModel, SearchResultsPanel, SuggestionAction,
    SuggestionModel, VenueDetail, VenueListItem, ViewContent, ViewModel,
};
use crate::EngineConfig;

use super::views::View;

/// The single active venue, if any.
///
/// At most one venue is selected at a time; `None` is a valid state (home
/// view with nothing chosen). Selection intentionally persists across view
/// switches — switching away and back does not clear it.
///
/// Selecting an id that the current filter hides is permitted: the detail
/// panel always reflects the raw venue, independent of the marker set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<VenueId>,
}

impl SelectionState {
    /// Makes `id` the active selection.
    pub fn select(&mut self, id: VenueId) {
        self.current = Some(id);
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The selected id, if any.
    #[must_use]
    pub fn current(&self) -> Option<VenueId> {
        self.current
    }

    /// Resolves the selection against the catalog.
    ///
    /// A stale id (no longer in the catalog) resolves to `None` and is never
    /// an error.
    #[must_use]
    pub fn current_venue<'a>(&self, catalog: &'a CatalogStore) -> Option<&'a Venue> {
        self.current.and_then(|id| catalog.get(id))
    }
}

/// Central application state container.
///
/// Mutated only by the event handler in response to host events; read by the
/// view-model projection. The durable key-value store is owned here and
/// threaded into the components that persist ([`FavoritesStore`],
/// [`ThemeMode`]).
pub struct AppState {
    /// Immutable venue catalog for the session.
    pub catalog: CatalogStore,

    /// Persistent favorites set.
    pub favorites: FavoritesStore,

    /// Durable key-value storage backend.
    pub store: Box<dyn KeyValueStore>,

    /// The active selection.
    pub selection: SelectionState,

    /// The active view.
    pub current_view: View,

    /// Venue-level filter (locations and search views, and the marker set).
    pub venue_filter: FilterCriterion,

    /// Machine-level filter (machines view). Independent of `venue_filter`.
    pub machine_filter: FilterCriterion,

    /// Current free-text search input.
    pub search_input: String,

    /// Marker reconciler for the rendering surface.
    pub markers: MarkerSync,

    /// Remote search state.
    pub resolver: SearchResolver,

    /// Live notifications.
    pub notifications: NotificationBus,

    /// Theme preference.
    pub theme: ThemeMode,

    /// Engine configuration.
    pub config: EngineConfig,
}

impl AppState {
    /// Creates the application state.
    ///
    /// Loads favorites and the theme preference from `store` (both fail open
    /// to empty/light on malformed content) and validates the catalog. The
    /// caller follows up with [`Event::Initialize`](crate::app::Event::Initialize)
    /// once a surface is available to place the initial markers.
    #[must_use]
    pub fn new(venues: Vec<Venue>, store: Box<dyn KeyValueStore>, config: EngineConfig) -> Self {
        let catalog = CatalogStore::new(venues);
        let favorites = FavoritesStore::load(store.as_ref());
        let theme = ThemeMode::load(store.as_ref());
        let notifications = NotificationBus::new(config.notification_ttl_secs);

        tracing::debug!(
            venue_count = catalog.len(),
            favorite_count = favorites.len(),
            theme = theme.as_str(),
            "application state initialized"
        );

        Self {
            catalog,
            favorites,
            store,
            selection: SelectionState::default(),
            current_view: View::default(),
            venue_filter: FilterCriterion::All,
            machine_filter: FilterCriterion::All,
            search_input: String::new(),
            markers: MarkerSync::new(),
            resolver: SearchResolver::new(),
            notifications,
            theme,
            config,
        }
    }

    /// Venues passing the current venue-level filter, catalog order.
    #[must_use]
    pub fn filtered_venues(&self) -> Vec<&Venue> {
        filter::venue_filter(self.catalog.venues(), &self.venue_filter, &self.favorites)
    }

    /// Reconciles the surface's markers against the filtered venue list.
    ///
    /// Called after every change that can alter the filtered set: a filter
    /// switch, a favorites toggle while `FavoritesOnly` is active, and
    /// initialization.
    pub fn sync_markers(&mut self, surface: &mut dyn MapSurface) {
        let filtered = filter::venue_filter(self.catalog.venues(), &self.venue_filter, &self.favorites);
        self.markers.reconcile(surface, &filtered);
    }

    /// Computes the display-ready view model for the current state.
    ///
    /// Pure projection: no mutation, deterministic, idempotent. The detail
    /// panel resolves the selection against the raw catalog, so a venue
    /// hidden by the active filter still shows its details; a stale selection
    /// yields no panel.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ViewModel {
        ViewModel {
            title: self.current_view.title().to_string(),
            content: self.compute_content(),
            detail: self.compute_detail(),
            search_panel: self.compute_search_panel(),
            notifications: self
                .notifications
                .active()
                .into_iter()
                .map(|notification| NotificationModel {
                    message: notification.message.clone(),
                    kind: match notification.kind {
                        NotificationKind::Info => "info",
                        NotificationKind::Success => "success",
                        NotificationKind::Error => "error",
                    },
                })
                .collect(),
        }
    }

    fn compute_content(&self) -> ViewContent {
        match self.current_view {
            View::Home => ViewContent::Home,
            View::Search => ViewContent::Search {
                suggestions: self.compute_suggestions(),
                venues: self.venue_list_items(),
            },
            View::Locations => ViewContent::Locations {
                venues: self.venue_list_items(),
            },
            View::Machines => {
                let groups = self.catalog.aggregated_machines();
                let cards = filter::aggregated_machine_filter(&groups, &self.machine_filter)
                    .into_iter()
                    .map(|group| MachineCard {
                        name: group.name.clone(),
                        year: group.year,
                        venue_names: group.venue_names.clone(),
                    })
                    .collect();
                ViewContent::Machines { cards }
            }
            View::Favorites => ViewContent::Favorites {
                cards: self
                    .favorites
                    .all()
                    .iter()
                    // Stale favorite ids are skipped, never an error.
                    .filter_map(|&id| self.catalog.get(id))
                    .map(|venue| FavoriteCard {
                        id: venue.id,
                        name: venue.name.clone(),
                        address: venue.address.clone(),
                        distance_label: venue.distance_label.clone(),
                        machine_count: venue.machines.len(),
                    })
                    .collect(),
            },
        }
    }

    fn compute_detail(&self) -> Option<VenueDetail> {
        let venue = self.selection.current_venue(&self.catalog)?;
        Some(VenueDetail {
            id: venue.id,
            name: venue.name.clone(),
            address: venue.address.clone(),
            distance_label: venue.distance_label.clone(),
            hours: venue.hours.clone(),
            phone: venue.phone.clone(),
            website: venue.website.clone(),
            machines: venue
                .machines
                .iter()
                .map(|machine| (machine.name.clone(), machine.year))
                .collect(),
            is_favorite: self.favorites.is_favorite(venue.id),
        })
    }

    fn compute_search_panel(&self) -> Option<SearchResultsPanel> {
        if !self.resolver.panel_visible() {
            return None;
        }
        Some(SearchResultsPanel {
            items: self
                .resolver
                .results()
                .iter()
                .filter_map(|&id| self.catalog.get(id))
                .map(|venue| self.venue_list_item(venue))
                .collect(),
        })
    }

    fn compute_suggestions(&self) -> Vec<SuggestionModel> {
        search::suggestions(&self.catalog, &self.search_input, &self.config.popular_queries)
            .into_iter()
            .map(|suggestion| match suggestion {
                Suggestion::ResolveRemote { query } => SuggestionModel {
                    title: format!("Search for \"{query}\""),
                    description: "Find this location on the map".to_string(),
                    action: SuggestionAction::SubmitQuery(query),
                },
                Suggestion::Venue { id, name, address } => SuggestionModel {
                    title: name,
                    description: address,
                    action: SuggestionAction::ChooseVenue(id),
                },
                Suggestion::Popular { query } => SuggestionModel {
                    title: query.clone(),
                    description: "Popular search".to_string(),
                    action: SuggestionAction::SubmitQuery(query),
                },
            })
            .collect()
    }

    fn venue_list_items(&self) -> Vec<VenueListItem> {
        self.filtered_venues()
            .into_iter()
            .map(|venue| self.venue_list_item(venue))
            .collect()
    }

    fn venue_list_item(&self, venue: &Venue) -> VenueListItem {
        VenueListItem {
            id: venue.id,
            name: venue.name.clone(),
            address: venue.address.clone(),
            distance_label: venue.distance_label.clone(),
            is_selected: self.selection.current() == Some(venue.id),
            is_favorite: self.favorites.is_favorite(venue.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample_venues;
    use crate::storage::{MemoryStore, FAVORITES_KEY};

    fn state() -> AppState {
        AppState::new(
            sample_venues(),
            Box::new(MemoryStore::default()),
            EngineConfig::default(),
        )
    }

    #[test]
    fn projection_is_idempotent() {
        let mut state = state();
        state.current_view = View::Locations;
        state.selection.select(VenueId(2));

        assert_eq!(state.compute_viewmodel(), state.compute_viewmodel());
    }

    #[test]
    fn detail_reflects_the_raw_venue_regardless_of_filter() {
        let mut state = state();
        state.venue_filter = FilterCriterion::NameContains("barcade".to_string());
        state.selection.select(VenueId(3)); // filtered out

        let vm = state.compute_viewmodel();
        let detail = vm.detail.unwrap();
        assert_eq!(detail.id, VenueId(3));
        assert_eq!(detail.name, "Four Quarters East London");
    }

    #[test]
    fn stale_selection_yields_no_detail_panel() {
        let mut state = state();
        state.selection.select(VenueId(999));
        assert!(state.compute_viewmodel().detail.is_none());
    }

    #[test]
    fn favorites_view_skips_stale_ids() {
        let mut state = state();
        state.favorites.add(VenueId(2), &mut *state.store).unwrap();
        state.favorites.add(VenueId(999), &mut *state.store).unwrap();
        state.current_view = View::Favorites;

        let vm = state.compute_viewmodel();
        let ViewContent::Favorites { cards } = vm.content else {
            panic!("expected favorites content");
        };
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, VenueId(2));
        assert_eq!(cards[0].machine_count, 5);
    }

    #[test]
    fn stale_favorites_survive_persistence_untouched() {
        let mut state = state();
        state.favorites.add(VenueId(999), &mut *state.store).unwrap();

        // Skipped at render but still persisted; the id is not scrubbed.
        let persisted = state.store.get(FAVORITES_KEY).unwrap();
        assert!(persisted.contains("999"));
    }

    #[test]
    fn machines_view_aggregates_and_filters() {
        let mut state = state();
        state.current_view = View::Machines;
        state.machine_filter = FilterCriterion::YearRange { min: 2000, max: i32::MAX };

        let vm = state.compute_viewmodel();
        let ViewContent::Machines { cards } = vm.content else {
            panic!("expected machines content");
        };
        assert!(!cards.is_empty());
        assert!(cards.iter().all(|card| card.year >= 2000));
        // All modern machines live at Modern Pinball NYC in the sample data.
        assert!(cards
            .iter()
            .all(|card| card.venue_names == vec!["Modern Pinball NYC".to_string()]));
    }

    #[test]
    fn search_view_carries_suggestions_and_filtered_list() {
        let mut state = state();
        state.current_view = View::Search;
        state.search_input = "barcade".to_string();

        let vm = state.compute_viewmodel();
        let ViewContent::Search { suggestions, venues } = vm.content else {
            panic!("expected search content");
        };
        assert!(matches!(
            suggestions[0].action,
            SuggestionAction::SubmitQuery(ref q) if q == "barcade"
        ));
        assert!(suggestions
            .iter()
            .any(|s| matches!(s.action, SuggestionAction::ChooseVenue(VenueId(1)))));
        // The venue list follows the venue filter, not the search input.
        assert_eq!(venues.len(), 3);
    }

    #[test]
    fn list_items_mark_selection_and_favorites() {
        let mut state = state();
        state.favorites.add(VenueId(1), &mut *state.store).unwrap();
        state.selection.select(VenueId(2));
        state.current_view = View::Locations;

        let vm = state.compute_viewmodel();
        let ViewContent::Locations { venues } = vm.content else {
            panic!("expected locations content");
        };
        assert!(venues[0].is_favorite && !venues[0].is_selected);
        assert!(venues[1].is_selected && !venues[1].is_favorite);
    }
}
