//! Pure filtering over venues and machines.
//!
//! The filter engine maps (catalog, criterion) to a filtered list without side
//! effects. Both functions are deterministic and order-preserving: results keep
//! the input order of the catalog and are never reordered by relevance.
//!
//! Exactly one criterion is active per view; selecting a new one replaces the
//! previous one rather than composing with it. The venue-level filter (locations
//! and search views) and the machine-level filter (machines view) are
//! independent [`FilterCriterion`] instances held by
//! [`AppState`](crate::app::AppState).

use crate::domain::{AggregatedMachine, Machine, Venue};
use crate::storage::FavoritesStore;

/// A single filter criterion.
///
/// Criteria without a meaning at a given level fall back to `All` rather than
/// failing: `FavoritesOnly` and `OpenNow` have no machine-level semantics and
/// behave as `All` when applied to machines.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FilterCriterion {
    /// Everything passes.
    #[default]
    All,
    /// Only venues currently in the favorites set.
    FavoritesOnly,
    /// Only venues that pass [`Venue::is_open_now`].
    OpenNow,
    /// Only entries whose year falls within `[min, max]` (inclusive).
    YearRange {
        /// Earliest year included.
        min: i32,
        /// Latest year included.
        max: i32,
    },
    /// Case-insensitive substring match; venue name OR address, machine name.
    NameContains(String),
}

/// Applies a criterion to the venue list.
///
/// Order-preserving subset of `venues`. `FavoritesOnly` consults the live
/// favorites set passed by the caller, never a snapshot, so results reflect
/// the latest toggle without a catalog reload. A venue passes `YearRange` when
/// at least one of its machines does.
#[must_use]
pub fn venue_filter<'a>(
    venues: &'a [Venue],
    criterion: &FilterCriterion,
    favorites: &FavoritesStore,
) -> Vec<&'a Venue> {
    venues
        .iter()
        .filter(|venue| venue_passes(venue, criterion, favorites))
        .collect()
}

fn venue_passes(venue: &Venue, criterion: &FilterCriterion, favorites: &FavoritesStore) -> bool {
    match criterion {
        FilterCriterion::All => true,
        FilterCriterion::FavoritesOnly => favorites.is_favorite(venue.id),
        FilterCriterion::OpenNow => venue.is_open_now(),
        FilterCriterion::YearRange { min, max } => venue
            .machines
            .iter()
            .any(|machine| (*min..=*max).contains(&machine.year)),
        FilterCriterion::NameContains(needle) => venue.matches_text(needle),
    }
}

/// Applies a criterion to a machine list.
///
/// Order-preserving subset of `machines`. Criteria without machine-level
/// semantics (`FavoritesOnly`, `OpenNow`) fall back to `All`.
#[must_use]
pub fn machine_filter<'a>(machines: &'a [Machine], criterion: &FilterCriterion) -> Vec<&'a Machine> {
    machines
        .iter()
        .filter(|machine| machine_passes(&machine.name, machine.year, criterion))
        .collect()
}

/// Applies a criterion to aggregated machine groups (the machines view).
///
/// Same semantics as [`machine_filter`], keyed on the group's name and
/// first-seen year.
#[must_use]
pub fn aggregated_machine_filter<'a>(
    groups: &'a [AggregatedMachine],
    criterion: &FilterCriterion,
) -> Vec<&'a AggregatedMachine> {
    groups
        .iter()
        .filter(|group| machine_passes(&group.name, group.year, criterion))
        .collect()
}

fn machine_passes(name: &str, year: i32, criterion: &FilterCriterion) -> bool {
    match criterion {
        FilterCriterion::All | FilterCriterion::FavoritesOnly | FilterCriterion::OpenNow => true,
        FilterCriterion::YearRange { min, max } => (*min..=*max).contains(&year),
        FilterCriterion::NameContains(needle) => {
            name.to_lowercase().contains(&needle.to_lowercase())
        }
    }
}
