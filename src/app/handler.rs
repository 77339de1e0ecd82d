//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user
//! interactions and geocoding completions, translating them into state changes
//! and host actions. It is the engine's only mutation entry point.
//!
//! # Architecture
//!
//! Unidirectional data flow, processed strictly in delivery order on a single
//! logical thread:
//!
//! 1. The host delivers an [`Event`]
//! 2. [`handle_event`] pattern-matches and mutates [`AppState`]
//! 3. Marker and view consequences are applied against the [`MapSurface`]
//! 4. Host side effects are returned as [`Action`]s, with a redraw flag
//!
//! The only suspension point in the whole engine is the in-flight geocoding
//! request between [`Event::SubmitSearch`] and [`Event::GeocodeCompleted`].
//!
//! # Error recovery
//!
//! Nothing here is fatal. Storage write failures are logged and surfaced as a
//! notification; stale venue ids are skipped silently; the handler's `Result`
//! exists for API evolution and currently never carries an error out.

use crate::app::{Action, AppState, View};
use crate::domain::error::Result;
use crate::domain::VenueId;
use crate::filter::FilterCriterion;
use crate::map::MapSurface;
use crate::notify::NotificationKind;
use crate::search::GeocodeOutcome;

/// Events triggered by user interaction or a completed geocoding request.
///
/// Each event is a discrete occurrence; the handler processes them
/// sequentially, in the order the platform delivers them, with no reordering
/// or batching.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// First event after construction: positions the map at the home view
    /// and places the initial markers.
    Initialize,

    /// Activates a view.
    SwitchView(View),

    /// Replaces the venue-level filter criterion.
    SetVenueFilter(FilterCriterion),

    /// Replaces the machine-level filter criterion.
    SetMachineFilter(FilterCriterion),

    /// The user clicked a venue marker on the map.
    MarkerClicked(VenueId),

    /// The user chose a venue from a list, card, or suggestion.
    ///
    /// Selects and highlights the venue, re-centers on it when its marker is
    /// present, and routes back to the home view.
    ChooseVenue(VenueId),

    /// Clears the active selection.
    ClearSelection,

    /// Toggles a venue's favorite status.
    ToggleFavorite(VenueId),

    /// Removes a venue from the favorites (the favorites-card dismiss
    /// control). A no-op if the venue is not favorited.
    RemoveFavorite(VenueId),

    /// The search input text changed.
    SearchInput(String),

    /// The user explicitly submitted a search for remote resolution.
    SubmitSearch(String),

    /// A geocoding request settled. `seq` echoes the submitted request.
    GeocodeCompleted {
        /// Sequence number from the originating [`Action::Geocode`].
        seq: u64,
        /// What the transport produced.
        outcome: GeocodeOutcome,
    },

    /// The user clicked an entry in the proximity results panel.
    ChooseSearchResult(VenueId),

    /// Clears the search input, result marker, and results panel.
    ClearSearch,

    /// Hides the proximity results panel.
    CloseSearchPanel,

    /// The user asked for directions to a venue.
    RequestDirections(VenueId),

    /// Flips and persists the theme preference.
    ToggleTheme,
}

/// Processes an event, mutates state, and returns `(redraw, actions)`.
///
/// `redraw` tells the host whether visible state changed; `actions` are host
/// side effects to execute in order.
///
/// # Errors
///
/// Reserved; every failure mode is currently recovered internally (see the
/// module docs).
#[allow(clippy::too_many_lines)]
pub fn handle_event(
    state: &mut AppState,
    surface: &mut dyn MapSurface,
    event: &Event,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Initialize => {
            surface.set_view(state.config.home_position, state.config.home_zoom);
            state.sync_markers(surface);
            Ok((true, vec![]))
        }
        Event::SwitchView(view) => {
            tracing::debug!(from = ?state.current_view, to = ?view, "switching view");
            state.current_view = *view;
            // Selection intentionally survives the switch.
            Ok((true, vec![]))
        }
        Event::SetVenueFilter(criterion) => {
            state.venue_filter = criterion.clone();
            state.sync_markers(surface);
            Ok((true, vec![]))
        }
        Event::SetMachineFilter(criterion) => {
            state.machine_filter = criterion.clone();
            Ok((true, vec![]))
        }
        Event::MarkerClicked(id) => {
            state.selection.select(*id);
            state.markers.highlight(surface, *id);
            Ok((true, vec![]))
        }
        Event::ChooseVenue(id) => {
            let Some(venue) = state.catalog.get(*id) else {
                tracing::debug!(venue_id = %id, "ignoring choice of venue not in catalog");
                return Ok((false, vec![]));
            };
            let coords = venue.coords;

            state.selection.select(*id);
            state.markers.highlight(surface, *id);
            if state.markers.handle_of(*id).is_some() {
                surface.set_view(coords, state.config.venue_zoom);
            }
            state.current_view = View::Home;
            Ok((true, vec![]))
        }
        Event::ClearSelection => {
            state.selection.clear();
            state.markers.clear_highlight(surface);
            Ok((true, vec![]))
        }
        Event::ToggleFavorite(id) => {
            if state.catalog.get(*id).is_none() {
                tracing::debug!(venue_id = %id, "ignoring favorite toggle for unknown venue");
                return Ok((false, vec![]));
            }

            let outcome = if state.favorites.is_favorite(*id) {
                state
                    .favorites
                    .remove(*id, &mut *state.store)
                    .map(|changed| (changed, NotificationKind::Info, "Location removed from favorites"))
            } else {
                state
                    .favorites
                    .add(*id, &mut *state.store)
                    .map(|changed| (changed, NotificationKind::Success, "Location added to favorites!"))
            };
            apply_favorite_outcome(state, surface, outcome)
        }
        Event::RemoveFavorite(id) => {
            let outcome = state
                .favorites
                .remove(*id, &mut *state.store)
                .map(|changed| (changed, NotificationKind::Info, "Location removed from favorites"));
            apply_favorite_outcome(state, surface, outcome)
        }
        Event::SearchInput(text) => {
            state.search_input.clone_from(text);
            Ok((true, vec![]))
        }
        Event::SubmitSearch(query) => {
            let actions: Vec<Action> = state
                .resolver
                .submit(query)
                .map(Action::Geocode)
                .into_iter()
                .collect();
            Ok((false, actions))
        }
        Event::GeocodeCompleted { seq, outcome } => {
            let redraw = state.resolver.complete(
                *seq,
                outcome,
                surface,
                &state.catalog,
                &state.config,
                &mut state.notifications,
            );
            Ok((redraw, vec![]))
        }
        Event::ChooseSearchResult(id) => {
            let Some(venue) = state.catalog.get(*id) else {
                tracing::debug!(venue_id = %id, "ignoring search result for unknown venue");
                return Ok((false, vec![]));
            };

            state.selection.select(*id);
            state
                .resolver
                .focus_venue(surface, venue, &state.config);
            Ok((true, vec![]))
        }
        Event::ClearSearch => {
            state.search_input.clear();
            state.resolver.clear(surface);
            Ok((true, vec![]))
        }
        Event::CloseSearchPanel => {
            state.resolver.hide_panel();
            Ok((true, vec![]))
        }
        Event::RequestDirections(id) => {
            let Some(venue) = state.catalog.get(*id) else {
                tracing::debug!(venue_id = %id, "ignoring directions request for unknown venue");
                return Ok((false, vec![]));
            };

            let url = venue.directions_url();
            state
                .notifications
                .push(NotificationKind::Info, "Opening directions in Google Maps...");
            Ok((true, vec![Action::OpenDirections { url }]))
        }
        Event::ToggleTheme => {
            let toggled = state.theme.toggled();
            if let Err(e) = toggled.save(&mut *state.store) {
                tracing::error!(error = %e, "failed to persist theme preference");
            }
            state.theme = toggled;
            Ok((true, vec![]))
        }
    }
}

/// Shared tail of the favorite mutation paths.
///
/// Emits the notification only when the set actually changed, re-reconciles
/// markers when the active filter depends on favorites, and converts a
/// persistence failure into an error notification instead of propagating it.
fn apply_favorite_outcome(
    state: &mut AppState,
    surface: &mut dyn MapSurface,
    outcome: Result<(bool, NotificationKind, &'static str)>,
) -> Result<(bool, Vec<Action>)> {
    match outcome {
        Ok((false, _, _)) => Ok((false, vec![])),
        Ok((true, kind, message)) => {
            state.notifications.push(kind, message);
            if matches!(state.venue_filter, FilterCriterion::FavoritesOnly) {
                state.sync_markers(surface);
            }
            Ok((true, vec![]))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to persist favorites");
            state
                .notifications
                .push(NotificationKind::Error, "Could not save favorites. Please try again.");
            Ok((true, vec![]))
        }
    }
}
