//! Rendering-surface abstraction.
//!
//! The engine never touches tiles, projection math, or DOM nodes; everything it
//! needs from the map is behind the [`MapSurface`] trait. Hosts implement it over
//! their actual rendering surface; tests implement it over a recording fake.
//!
//! Marker interaction events flow the other way: when the user clicks a marker,
//! the host translates the surface callback into
//! [`Event::MarkerClicked`](crate::app::Event::MarkerClicked) on the single
//! event thread, so the engine never registers callbacks itself.

use crate::domain::Coordinates;

/// Opaque handle to a marker owned by the rendering surface.
///
/// Handles are minted by [`MapSurface::add_marker`] and stay valid until
/// passed to [`MapSurface::remove_marker`]. Handle identity matters: a marker
/// carries the surface's click-binding state, so reconciliation must reuse
/// handles for venues that survive a filter change instead of recreating them.
///
/// A handle is a lookup association only, never ownership — destroying a
/// marker must never destroy the venue it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Visual style of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Regular venue marker.
    Venue,
    /// The single highlighted venue marker.
    VenueHighlighted,
    /// The single search-result marker.
    SearchResult,
}

/// Operations the engine requires from the rendering surface.
///
/// All methods are infallible from the engine's point of view: a surface that
/// cannot honor an operation should log and drop it rather than propagate.
pub trait MapSurface {
    /// Places a marker and returns its handle.
    fn add_marker(&mut self, coords: Coordinates, style: MarkerStyle) -> MarkerHandle;

    /// Removes a marker. Unknown handles are ignored.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Updates a marker's visual style in place, preserving its identity.
    fn set_marker_style(&mut self, handle: MarkerHandle, style: MarkerStyle);

    /// Re-centers the viewport.
    fn set_view(&mut self, coords: Coordinates, zoom: u8);
}

/// Recording fake surface used across the crate's tests.
///
/// Mints sequential handles and keeps the live marker table plus an operation
/// log, so tests can assert on handle stability and on exactly which surface
/// calls a state transition produced.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_handle: u64,
    /// Live markers: (handle, coords, current style).
    pub markers: Vec<(MarkerHandle, Coordinates, MarkerStyle)>,
    /// Last `set_view` call, if any.
    pub view: Option<(Coordinates, u8)>,
    /// Count of `add_marker` calls over the surface's lifetime.
    pub adds: usize,
    /// Count of `remove_marker` calls over the surface's lifetime.
    pub removes: usize,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn style_of(&self, handle: MarkerHandle) -> Option<MarkerStyle> {
        self.markers
            .iter()
            .find(|(h, _, _)| *h == handle)
            .map(|(_, _, style)| *style)
    }

    pub fn live_handles(&self) -> Vec<MarkerHandle> {
        self.markers.iter().map(|(h, _, _)| *h).collect()
    }
}

#[cfg(test)]
impl MapSurface for RecordingSurface {
    fn add_marker(&mut self, coords: Coordinates, style: MarkerStyle) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.push((handle, coords, style));
        self.adds += 1;
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.retain(|(h, _, _)| *h != handle);
        self.removes += 1;
    }

    fn set_marker_style(&mut self, handle: MarkerHandle, style: MarkerStyle) {
        if let Some(entry) = self.markers.iter_mut().find(|(h, _, _)| *h == handle) {
            entry.2 = style;
        }
    }

    fn set_view(&mut self, coords: Coordinates, zoom: u8) {
        self.view = Some((coords, zoom));
    }
}
