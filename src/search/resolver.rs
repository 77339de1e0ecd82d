//! Remote search resolution and the single result marker.
//!
//! [`SearchResolver`] owns everything that exists because of an explicit search
//! submission: the in-flight request bookkeeping, the one result marker on the
//! surface (replaced, never stacked), the resolved point, and the proximity
//! results panel.
//!
//! # Out-of-order completions
//!
//! There is no transport-level cancellation; superseding is handled by a
//! last-submitted-wins rule. Every submission gets a fresh sequence number and
//! becomes the only acceptable one: a completion whose number no longer matches
//! is discarded outright, so a slow first response can never overwrite the
//! result of a newer query.

use crate::domain::{CatalogStore, Coordinates, Venue, VenueId};
use crate::map::surface::{MapSurface, MarkerHandle, MarkerStyle};
use crate::notify::{NotificationBus, NotificationKind};
use crate::search::geocode::{GeocodeOutcome, GeocodeRequest};
use crate::EngineConfig;

/// The point the last successful submission resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPoint {
    /// Resolved coordinates.
    pub coords: Coordinates,
    /// Label reported by the service (or the venue name after a
    /// result-panel click).
    pub label: String,
}

/// State machine for remote search.
#[derive(Debug, Default)]
pub struct SearchResolver {
    next_seq: u64,
    /// Sequence number of the newest submission; completions carrying any
    /// other number are stale.
    current_seq: Option<u64>,
    /// Query text of the newest submission, for notification wording.
    current_query: Option<String>,
    result_marker: Option<MarkerHandle>,
    resolved: Option<ResolvedPoint>,
    results: Vec<VenueId>,
    panel_visible: bool,
}

impl SearchResolver {
    /// Creates a resolver with nothing in flight and no marker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a submission and returns the request for the host to send.
    ///
    /// Blank queries return `None`. Submitting supersedes any in-flight
    /// request: its completion will be discarded when it eventually arrives.
    pub fn submit(&mut self, query: &str) -> Option<GeocodeRequest> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.current_seq = Some(seq);
        self.current_query = Some(query.to_string());

        tracing::debug!(seq = seq, query = %query, "geocode request submitted");
        Some(GeocodeRequest {
            seq,
            query: query.to_string(),
        })
    }

    /// Applies a completed geocoding request.
    ///
    /// Returns `true` when the completion changed visible state. Stale
    /// completions (superseded by a newer submission) change nothing and
    /// return `false`.
    pub fn complete(
        &mut self,
        seq: u64,
        outcome: &GeocodeOutcome,
        surface: &mut dyn MapSurface,
        catalog: &CatalogStore,
        config: &EngineConfig,
        notifications: &mut NotificationBus,
    ) -> bool {
        if self.current_seq != Some(seq) {
            tracing::debug!(
                seq = seq,
                current = ?self.current_seq,
                "discarding stale geocode completion"
            );
            return false;
        }
        self.current_seq = None;
        let query = self.current_query.take().unwrap_or_default();

        match outcome {
            GeocodeOutcome::TransportFailed(reason) => {
                tracing::warn!(seq = seq, reason = %reason, "geocode transport failed");
                notifications.push(
                    NotificationKind::Error,
                    "Error searching location. Please try again.",
                );
                true
            }
            GeocodeOutcome::Resolved(hits) => {
                let Some(first) = hits.first() else {
                    notifications.push(NotificationKind::Info, "Location not found");
                    return true;
                };

                let Some(coords) = first.coordinates() else {
                    tracing::warn!(seq = seq, lat = %first.lat, lon = %first.lon, "unusable geocode hit");
                    notifications.push(
                        NotificationKind::Error,
                        "Error searching location. Please try again.",
                    );
                    return true;
                };

                self.place_result_marker(surface, coords);
                self.resolved = Some(ResolvedPoint {
                    coords,
                    label: first.display_name.clone(),
                });
                surface.set_view(coords, config.search_zoom);
                notifications.push(NotificationKind::Success, format!("Navigated to {query}"));

                self.scan_proximity(coords, catalog, config, notifications);
                true
            }
        }
    }

    /// Re-targets the result marker at a venue chosen from the results panel.
    ///
    /// Mirrors a fresh resolution at the venue's position: the marker is
    /// replaced, the view re-centers at venue zoom, and the panel hides.
    pub fn focus_venue(
        &mut self,
        surface: &mut dyn MapSurface,
        venue: &Venue,
        config: &EngineConfig,
    ) {
        self.place_result_marker(surface, venue.coords);
        self.resolved = Some(ResolvedPoint {
            coords: venue.coords,
            label: venue.name.clone(),
        });
        surface.set_view(venue.coords, config.venue_zoom);
        self.panel_visible = false;
    }

    /// Clears all search state: marker, resolved point, results panel, and
    /// any in-flight request (its completion becomes stale).
    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        if let Some(handle) = self.result_marker.take() {
            surface.remove_marker(handle);
        }
        self.resolved = None;
        self.results.clear();
        self.panel_visible = false;
        self.current_seq = None;
        self.current_query = None;
    }

    /// Hides the proximity results panel without touching the marker.
    pub fn hide_panel(&mut self) {
        self.panel_visible = false;
    }

    /// Venue ids in the proximity results panel, catalog order.
    #[must_use]
    pub fn results(&self) -> &[VenueId] {
        &self.results
    }

    /// Whether the proximity results panel is shown.
    #[must_use]
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// The last resolved point, if a submission succeeded.
    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedPoint> {
        self.resolved.as_ref()
    }

    /// Handle of the current result marker, if one is placed.
    #[must_use]
    pub fn result_marker(&self) -> Option<MarkerHandle> {
        self.result_marker
    }

    /// Replaces the single result marker. Never leaves two on the surface.
    fn place_result_marker(&mut self, surface: &mut dyn MapSurface, coords: Coordinates) {
        if let Some(previous) = self.result_marker.take() {
            surface.remove_marker(previous);
        }
        self.result_marker = Some(surface.add_marker(coords, MarkerStyle::SearchResult));
    }

    /// Finds catalog venues within the configured degree radius of the
    /// resolved point and fills the results panel.
    fn scan_proximity(
        &mut self,
        center: Coordinates,
        catalog: &CatalogStore,
        config: &EngineConfig,
        notifications: &mut NotificationBus,
    ) {
        self.results = catalog
            .venues()
            .iter()
            .filter(|venue| venue.coords.degree_distance(&center) < config.proximity_radius_deg)
            .map(|venue| venue.id)
            .collect();

        if self.results.is_empty() {
            self.panel_visible = false;
            notifications.push(
                NotificationKind::Info,
                "No pinball locations found in this area",
            );
        } else {
            self.panel_visible = true;
            let count = self.results.len();
            let plural = if count == 1 { "" } else { "s" };
            notifications.push(
                NotificationKind::Success,
                format!("Found {count} pinball location{plural} in this area"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample_venues, CatalogStore};
    use crate::map::surface::RecordingSurface;
    use crate::notify::NotificationBus;
    use crate::search::geocode::GeocodeHit;

    fn paris_hit() -> GeocodeHit {
        GeocodeHit {
            lat: "48.8566".to_string(),
            lon: "2.3522".to_string(),
            display_name: "Paris, France".to_string(),
            kind: "city".to_string(),
        }
    }

    fn setup() -> (SearchResolver, RecordingSurface, CatalogStore, EngineConfig, NotificationBus) {
        (
            SearchResolver::new(),
            RecordingSurface::default(),
            CatalogStore::new(sample_venues()),
            EngineConfig::default(),
            NotificationBus::new(60),
        )
    }

    #[test]
    fn successful_resolution_places_one_marker_and_recenters() {
        let (mut resolver, mut surface, catalog, config, mut bus) = setup();

        let request = resolver.submit("Paris").unwrap();
        let outcome = GeocodeOutcome::Resolved(vec![paris_hit()]);
        assert!(resolver.complete(request.seq, &outcome, &mut surface, &catalog, &config, &mut bus));

        assert_eq!(surface.markers.len(), 1);
        let (_, coords, style) = surface.markers[0];
        assert!((coords.lat - 48.8566).abs() < 1e-9);
        assert!((coords.lng - 2.3522).abs() < 1e-9);
        assert_eq!(style, MarkerStyle::SearchResult);

        let (view_coords, zoom) = surface.view.unwrap();
        assert!((view_coords.lat - 48.8566).abs() < 1e-9);
        assert_eq!(zoom, config.search_zoom);

        // Nothing in the sample catalog is within 0.5 degrees of Paris.
        assert!(!resolver.panel_visible());
        assert!(bus
            .active()
            .iter()
            .any(|n| n.message == "Navigated to Paris"));
    }

    #[test]
    fn second_resolution_replaces_the_marker_never_stacks() {
        let (mut resolver, mut surface, catalog, config, mut bus) = setup();

        let first = resolver.submit("Paris").unwrap();
        resolver.complete(
            first.seq,
            &GeocodeOutcome::Resolved(vec![paris_hit()]),
            &mut surface,
            &catalog,
            &config,
            &mut bus,
        );
        let second = resolver.submit("London").unwrap();
        let london = GeocodeHit {
            lat: "51.5074".to_string(),
            lon: "-0.1278".to_string(),
            display_name: "London, UK".to_string(),
            kind: "city".to_string(),
        };
        resolver.complete(
            second.seq,
            &GeocodeOutcome::Resolved(vec![london]),
            &mut surface,
            &catalog,
            &config,
            &mut bus,
        );

        assert_eq!(surface.markers.len(), 1);
        assert!((surface.markers[0].1.lat - 51.5074).abs() < 1e-9);
    }

    #[test]
    fn proximity_scan_fills_the_panel() {
        let (mut resolver, mut surface, catalog, config, mut bus) = setup();

        // Resolve right next to the two New York venues.
        let request = resolver.submit("new york").unwrap();
        let hit = GeocodeHit {
            lat: "40.7400".to_string(),
            lon: "-73.9700".to_string(),
            display_name: "New York, USA".to_string(),
            kind: "city".to_string(),
        };
        resolver.complete(
            request.seq,
            &GeocodeOutcome::Resolved(vec![hit]),
            &mut surface,
            &catalog,
            &config,
            &mut bus,
        );

        assert!(resolver.panel_visible());
        let ids: Vec<i64> = resolver.results().iter().map(|id| id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(bus
            .active()
            .iter()
            .any(|n| n.message == "Found 2 pinball locations in this area"));
    }

    #[test]
    fn empty_result_notifies_once_and_keeps_marker_state() {
        let (mut resolver, mut surface, catalog, config, mut bus) = setup();

        let request = resolver.submit("zzzxyznowhere").unwrap();
        assert!(resolver.complete(
            request.seq,
            &GeocodeOutcome::Resolved(vec![]),
            &mut surface,
            &catalog,
            &config,
            &mut bus,
        ));

        assert!(surface.markers.is_empty());
        assert!(resolver.result_marker().is_none());
        let not_found: Vec<_> = bus
            .active()
            .into_iter()
            .filter(|n| n.message == "Location not found")
            .collect();
        assert_eq!(not_found.len(), 1);
    }

    #[test]
    fn transport_failure_leaves_the_previous_marker_alone() {
        let (mut resolver, mut surface, catalog, config, mut bus) = setup();

        let first = resolver.submit("Paris").unwrap();
        resolver.complete(
            first.seq,
            &GeocodeOutcome::Resolved(vec![paris_hit()]),
            &mut surface,
            &catalog,
            &config,
            &mut bus,
        );
        let marker_before = resolver.result_marker().unwrap();

        let second = resolver.submit("Berlin").unwrap();
        resolver.complete(
            second.seq,
            &GeocodeOutcome::TransportFailed("timeout".to_string()),
            &mut surface,
            &catalog,
            &config,
            &mut bus,
        );

        assert_eq!(resolver.result_marker(), Some(marker_before));
        assert_eq!(surface.markers.len(), 1);
        assert!(bus
            .active()
            .iter()
            .any(|n| n.kind == NotificationKind::Error));
    }

    #[test]
    fn out_of_order_completion_is_discarded() {
        let (mut resolver, mut surface, catalog, config, mut bus) = setup();

        let a = resolver.submit("A").unwrap();
        let b = resolver.submit("B").unwrap();

        // B's response arrives first and wins.
        let b_hit = GeocodeHit {
            lat: "51.5074".to_string(),
            lon: "-0.1278".to_string(),
            display_name: "B-town".to_string(),
            kind: String::new(),
        };
        assert!(resolver.complete(
            b.seq,
            &GeocodeOutcome::Resolved(vec![b_hit]),
            &mut surface,
            &catalog,
            &config,
            &mut bus,
        ));

        // A's late response must not overwrite it.
        assert!(!resolver.complete(
            a.seq,
            &GeocodeOutcome::Resolved(vec![paris_hit()]),
            &mut surface,
            &catalog,
            &config,
            &mut bus,
        ));

        assert_eq!(resolver.resolved().unwrap().label, "B-town");
        assert_eq!(surface.markers.len(), 1);
        assert!((surface.markers[0].1.lat - 51.5074).abs() < 1e-9);
    }

    #[test]
    fn blank_submissions_are_rejected() {
        let mut resolver = SearchResolver::new();
        assert!(resolver.submit("   ").is_none());
        assert!(resolver.submit("").is_none());
    }

    #[test]
    fn clear_removes_the_marker_and_invalidates_in_flight_requests() {
        let (mut resolver, mut surface, catalog, config, mut bus) = setup();

        let first = resolver.submit("Paris").unwrap();
        resolver.complete(
            first.seq,
            &GeocodeOutcome::Resolved(vec![paris_hit()]),
            &mut surface,
            &catalog,
            &config,
            &mut bus,
        );
        let pending = resolver.submit("London").unwrap();
        resolver.clear(&mut surface);

        assert!(surface.markers.is_empty());
        assert!(resolver.resolved().is_none());

        // The in-flight completion is now stale.
        assert!(!resolver.complete(
            pending.seq,
            &GeocodeOutcome::Resolved(vec![paris_hit()]),
            &mut surface,
            &catalog,
            &config,
            &mut bus,
        ));
        assert!(surface.markers.is_empty());
    }
}
