//! Marker reconciliation against the filtered venue list.
//!
//! [`MarkerSync`] owns the 1:1 mapping between the currently filtered venues and
//! the rendering surface's marker handles. It is the most stateful piece of the
//! engine and the one whose invariants are easiest to break, so its contract is
//! strict:
//!
//! - After any reconcile, the set of present marker venue-ids equals exactly the
//!   filtered venue-id set — no extras, no omissions.
//! - Markers for venues present before AND after a change are left untouched.
//!   Handle identity is a correctness property, not an optimization: handles
//!   carry the surface's click-binding state.
//! - At most one marker is highlighted at a time.
//!
//! Per-marker state machine: `absent → present → highlighted → present →
//! absent`, where `highlighted → absent` is reachable directly when a filter
//! change removes the selected venue.

use std::collections::{HashMap, HashSet};

use crate::domain::{Venue, VenueId};
use crate::map::surface::{MapSurface, MarkerHandle, MarkerStyle};

/// Reconciler owning the venue-id → marker-handle table.
///
/// The search-result marker is NOT managed here; it belongs to
/// [`SearchResolver`](crate::search::SearchResolver) and follows its own
/// replace-never-stack rule.
#[derive(Debug, Default)]
pub struct MarkerSync {
    markers: HashMap<VenueId, MarkerHandle>,
    highlighted: Option<VenueId>,
}

impl MarkerSync {
    /// Creates an empty reconciler with no markers on the surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the surface's marker set against `venues`.
    ///
    /// Removes markers for venues that left the filtered set, adds markers for
    /// venues that entered it, and leaves surviving markers alone. If the
    /// highlighted venue is removed, the highlight goes with it (the
    /// `highlighted → absent` transition); the caller's selection state is
    /// intentionally NOT touched — the detail view may keep showing a venue
    /// the filter hides.
    pub fn reconcile(&mut self, surface: &mut dyn MapSurface, venues: &[&Venue]) {
        let _span = tracing::debug_span!(
            "reconcile_markers",
            present = self.markers.len(),
            desired = venues.len()
        )
        .entered();

        let desired: HashSet<VenueId> = venues.iter().map(|venue| venue.id).collect();

        let departed: Vec<VenueId> = self
            .markers
            .keys()
            .filter(|id| !desired.contains(id))
            .copied()
            .collect();
        for id in departed {
            if let Some(handle) = self.markers.remove(&id) {
                surface.remove_marker(handle);
            }
            if self.highlighted == Some(id) {
                self.highlighted = None;
            }
        }

        for venue in venues {
            if !self.markers.contains_key(&venue.id) {
                let handle = surface.add_marker(venue.coords, MarkerStyle::Venue);
                self.markers.insert(venue.id, handle);
            }
        }

        tracing::debug!(marker_count = self.markers.len(), "markers reconciled");
    }

    /// Highlights the marker for `id`, returning all others to normal.
    ///
    /// If the venue has no marker (filtered out), no marker ends up
    /// highlighted — any previous highlight is cleared — but the caller still
    /// updates its selection; the detail panel shows the raw venue regardless
    /// of the active filter.
    pub fn highlight(&mut self, surface: &mut dyn MapSurface, id: VenueId) {
        if let Some(previous) = self.highlighted.take() {
            if previous != id {
                if let Some(&handle) = self.markers.get(&previous) {
                    surface.set_marker_style(handle, MarkerStyle::Venue);
                }
            }
        }

        if let Some(&handle) = self.markers.get(&id) {
            surface.set_marker_style(handle, MarkerStyle::VenueHighlighted);
            self.highlighted = Some(id);
        } else {
            tracing::debug!(venue_id = %id, "highlight requested for venue without marker");
        }
    }

    /// Returns the highlighted marker to normal, if any.
    pub fn clear_highlight(&mut self, surface: &mut dyn MapSurface) {
        if let Some(previous) = self.highlighted.take() {
            if let Some(&handle) = self.markers.get(&previous) {
                surface.set_marker_style(handle, MarkerStyle::Venue);
            }
        }
    }

    /// The venue whose marker is currently highlighted, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<VenueId> {
        self.highlighted
    }

    /// Handle for a venue's marker, if the venue is in the present set.
    #[must_use]
    pub fn handle_of(&self, id: VenueId) -> Option<MarkerHandle> {
        self.markers.get(&id).copied()
    }

    /// Ids of the venues that currently have markers, in no particular order.
    #[must_use]
    pub fn venue_ids(&self) -> Vec<VenueId> {
        self.markers.keys().copied().collect()
    }

    /// Number of markers on the surface.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether no markers are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample_venues;
    use crate::map::surface::RecordingSurface;

    fn ids(sync: &MarkerSync) -> Vec<i64> {
        let mut ids: Vec<i64> = sync.venue_ids().iter().map(|id| id.0).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn reconcile_mirrors_the_filtered_set_exactly() {
        let venues = sample_venues();
        let mut surface = RecordingSurface::default();
        let mut sync = MarkerSync::new();

        let all: Vec<&_> = venues.iter().collect();
        sync.reconcile(&mut surface, &all);
        assert_eq!(ids(&sync), vec![1, 2, 3]);
        assert_eq!(surface.markers.len(), 3);

        let just_two: Vec<&_> = venues.iter().filter(|v| v.id.0 != 3).collect();
        sync.reconcile(&mut surface, &just_two);
        assert_eq!(ids(&sync), vec![1, 2]);
        assert_eq!(surface.markers.len(), 2);
    }

    #[test]
    fn surviving_markers_keep_their_handles() {
        let venues = sample_venues();
        let mut surface = RecordingSurface::default();
        let mut sync = MarkerSync::new();

        // Two overlapping filters: {1,2} then {2,3}.
        let first: Vec<&_> = venues.iter().filter(|v| v.id.0 != 3).collect();
        sync.reconcile(&mut surface, &first);
        let handle_of_two = sync.handle_of(venues[1].id).unwrap();
        let adds_before = surface.adds;

        let second: Vec<&_> = venues.iter().filter(|v| v.id.0 != 1).collect();
        sync.reconcile(&mut surface, &second);

        assert_eq!(sync.handle_of(venues[1].id), Some(handle_of_two));
        // Only venue 3 was added; venue 2 was not recreated.
        assert_eq!(surface.adds, adds_before + 1);
        assert_eq!(ids(&sync), vec![2, 3]);
    }

    #[test]
    fn exactly_one_marker_is_highlighted() {
        let venues = sample_venues();
        let mut surface = RecordingSurface::default();
        let mut sync = MarkerSync::new();
        let all: Vec<&_> = venues.iter().collect();
        sync.reconcile(&mut surface, &all);

        sync.highlight(&mut surface, venues[0].id);
        sync.highlight(&mut surface, venues[1].id);

        let highlighted: Vec<_> = surface
            .markers
            .iter()
            .filter(|(_, _, style)| *style == MarkerStyle::VenueHighlighted)
            .collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(sync.highlighted(), Some(venues[1].id));
        assert_eq!(
            surface.style_of(sync.handle_of(venues[0].id).unwrap()),
            Some(MarkerStyle::Venue)
        );
    }

    #[test]
    fn highlight_for_filtered_out_venue_clears_any_highlight() {
        let venues = sample_venues();
        let mut surface = RecordingSurface::default();
        let mut sync = MarkerSync::new();
        let subset: Vec<&_> = venues.iter().filter(|v| v.id.0 == 1).collect();
        sync.reconcile(&mut surface, &subset);

        sync.highlight(&mut surface, venues[0].id);
        sync.highlight(&mut surface, venues[2].id); // no marker for venue 3

        assert_eq!(sync.highlighted(), None);
        assert!(surface
            .markers
            .iter()
            .all(|(_, _, style)| *style == MarkerStyle::Venue));
    }

    #[test]
    fn highlighted_to_absent_is_a_legal_transition() {
        let venues = sample_venues();
        let mut surface = RecordingSurface::default();
        let mut sync = MarkerSync::new();
        let all: Vec<&_> = venues.iter().collect();
        sync.reconcile(&mut surface, &all);
        sync.highlight(&mut surface, venues[0].id);

        let without_first: Vec<&_> = venues.iter().filter(|v| v.id.0 != 1).collect();
        sync.reconcile(&mut surface, &without_first);

        assert_eq!(sync.highlighted(), None);
        assert_eq!(ids(&sync), vec![2, 3]);
    }
}
