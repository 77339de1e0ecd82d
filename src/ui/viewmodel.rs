//! View model types representing renderable UI state.
//!
//! View models are immutable projections computed from application state,
//! following the MVVM pattern: rendering is a one-way projection from state to
//! the host's UI tree, and these types are the boundary. They contain no
//! business logic, only display-ready data, and derive `PartialEq` so that
//! projection idempotence is directly testable (same state → equal view
//! model).

use crate::domain::VenueId;

/// Complete view model for one frame.
///
/// Computed by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    /// Page title for the active view.
    pub title: String,

    /// The active view's list/grid content.
    pub content: ViewContent,

    /// Detail panel for the selected venue, if any.
    ///
    /// Present regardless of the active view and of whether the selected
    /// venue passes the current filter; a stale selection simply yields
    /// `None`.
    pub detail: Option<VenueDetail>,

    /// Proximity results panel from the last successful search, when shown.
    pub search_panel: Option<SearchResultsPanel>,

    /// Live notifications, oldest first.
    pub notifications: Vec<NotificationModel>,
}

/// Content of the active view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewContent {
    /// Map-centric view; the marker set and the detail panel carry the data.
    Home,
    /// Search view: suggestion list plus the filtered venue list.
    Search {
        /// Suggestions for the current input, in display order.
        suggestions: Vec<SuggestionModel>,
        /// Venues passing the venue-level filter.
        venues: Vec<VenueListItem>,
    },
    /// All-locations list, filtered.
    Locations {
        /// Venues passing the venue-level filter.
        venues: Vec<VenueListItem>,
    },
    /// Machine card grid, aggregated across venues and filtered.
    Machines {
        /// Aggregated machine groups passing the machine-level filter.
        cards: Vec<MachineCard>,
    },
    /// Favorite venue cards; empty when nothing is favorited.
    Favorites {
        /// One card per favorited venue still present in the catalog.
        cards: Vec<FavoriteCard>,
    },
}

/// One row in a venue list.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueListItem {
    /// Venue id, carried typed for click handling.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Address line.
    pub address: String,
    /// Precomputed distance label.
    pub distance_label: String,
    /// Whether this venue is the active selection.
    pub is_selected: bool,
    /// Whether this venue is favorited.
    pub is_favorite: bool,
}

/// One card in the machines grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineCard {
    /// Machine name.
    pub name: String,
    /// Release year (first-seen on collision).
    pub year: i32,
    /// Venues carrying this machine, first-seen order.
    pub venue_names: Vec<String>,
}

/// One card in the favorites grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteCard {
    /// Venue id.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Address line.
    pub address: String,
    /// Precomputed distance label.
    pub distance_label: String,
    /// Number of machines at the venue.
    pub machine_count: usize,
}

/// Detail panel for the selected venue.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueDetail {
    /// Venue id.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Address line.
    pub address: String,
    /// Precomputed distance label.
    pub distance_label: String,
    /// Opening hours display string.
    pub hours: String,
    /// Contact phone number.
    pub phone: String,
    /// Web site address.
    pub website: String,
    /// Machine list: (name, year) in venue order.
    pub machines: Vec<(String, i32)>,
    /// Whether the venue is favorited (drives the favorite button state).
    pub is_favorite: bool,
}

/// One suggestion tile in the search view.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionModel {
    /// Primary tile text.
    pub title: String,
    /// Secondary tile text.
    pub description: String,
    /// What clicking the tile should do.
    pub action: SuggestionAction,
}

/// Click behavior of a suggestion tile.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionAction {
    /// Submit this query for remote resolution.
    SubmitQuery(String),
    /// Select this catalog venue.
    ChooseVenue(VenueId),
}

/// The proximity results panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultsPanel {
    /// Venues near the resolved point, catalog order.
    pub items: Vec<VenueListItem>,
}

/// A live notification ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationModel {
    /// Message text.
    pub message: String,
    /// Severity string for styling: `info`, `success`, or `error`.
    pub kind: &'static str,
}
