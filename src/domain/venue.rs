//! Venue domain model and operations.
//!
//! This module defines the core [`Venue`] type representing a catalog entry with
//! geographic coordinates and an ordered list of [`Machine`]s, together with the
//! typed [`VenueId`] identifier and validated [`Coordinates`]. Venues are immutable
//! for the lifetime of a session and are owned exclusively by the
//! [`CatalogStore`](crate::domain::CatalogStore).

use serde::{Deserialize, Serialize};

use crate::domain::error::{PinfinderError, Result};

/// Valid latitude range in degrees.
const LAT_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
const LNG_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Typed identifier for a venue.
///
/// Identifiers are unique and stable for the session. Carrying them as a newtype
/// (rather than attribute-string-encoded ids parsed back and forth at the UI
/// boundary) eliminates format round-trips as a source of type confusion: marker
/// handles, list items, and the favorites set all refer to venues through this
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub i64);

impl std::fmt::Display for VenueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A geographic point in WGS84 degrees.
///
/// Constructed through [`Coordinates::new`], which enforces the valid ranges
/// (latitude ∈ [-90, 90], longitude ∈ [-180, 180]). Deserialized values are NOT
/// revalidated by serde; catalog ingestion revalidates at
/// [`CatalogStore::new`](crate::domain::CatalogStore::new).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl Coordinates {
    /// Creates coordinates, enforcing valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`PinfinderError::Geocode`] if either component is out of range
    /// or not finite.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        let candidate = Self { lat, lng };
        if candidate.is_valid() {
            Ok(candidate)
        } else {
            Err(PinfinderError::Geocode(format!(
                "coordinates out of range: ({lat}, {lng})"
            )))
        }
    }

    /// Returns whether both components are finite and within valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && LAT_RANGE.contains(&self.lat)
            && LNG_RANGE.contains(&self.lng)
    }

    /// Euclidean distance to another point in coordinate-degree space.
    ///
    /// This is deliberately NOT a great-circle distance: proximity checks around
    /// a resolved search point use a plain degree-space threshold, matching the
    /// documented search contract.
    #[must_use]
    pub fn degree_distance(&self, other: &Self) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        dlat.hypot(dlng)
    }
}

/// A machine listed at a venue.
///
/// Machines are implicitly owned by their parent venue and carry no independent
/// identity: two venues may each list a machine with the same name, and those are
/// distinct records until aggregated via
/// [`CatalogStore::aggregated_machines`](crate::domain::CatalogStore::aggregated_machines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    /// Display name of the machine.
    pub name: String,
    /// Release year.
    pub year: i32,
}

impl Machine {
    /// Creates a new machine entry.
    pub fn new(name: impl Into<String>, year: i32) -> Self {
        Self {
            name: name.into(),
            year,
        }
    }
}

/// A catalog venue: a place with coordinates and a set of machines.
///
/// Venues are immutable for the session. All fields besides `id`, `name` and
/// `coords` are presentational metadata passed through to view models unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Unique, stable identifier.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Geographic position.
    pub coords: Coordinates,
    /// Street address display string.
    pub address: String,
    /// Precomputed distance label (e.g. "0.8 km").
    pub distance_label: String,
    /// Opening hours display string. Empty means hours are unknown.
    pub hours: String,
    /// Contact phone number.
    pub phone: String,
    /// Web site address.
    pub website: String,
    /// Ordered list of machines available at this venue.
    pub machines: Vec<Machine>,
}

impl Venue {
    /// Whether the venue should pass an "open now" filter.
    ///
    /// The catalog only carries a display string for opening hours, so the
    /// predicate is conservative: venues with unknown (empty) hours are treated
    /// as closed, everything else as open. Structured opening-hours data would
    /// slot in here.
    #[must_use]
    pub fn is_open_now(&self) -> bool {
        !self.hours.trim().is_empty()
    }

    /// Case-insensitive substring match against the venue name or address.
    ///
    /// This is the single matching rule shared by the `NameContains` filter
    /// criterion and the local search suggestions.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.address.to_lowercase().contains(&needle)
    }

    /// Builds the external navigation deep link for this venue.
    ///
    /// The link targets the Google Maps directions endpoint with the venue's
    /// coordinates as the destination and its percent-encoded name as the
    /// destination label. Opening the link is the host's job
    /// ([`Action::OpenDirections`](crate::app::Action::OpenDirections)); no
    /// response is handled.
    #[must_use]
    pub fn directions_url(&self) -> String {
        use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

        // encodeURIComponent leaves these unreserved characters alone.
        const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
            .remove(b'-')
            .remove(b'_')
            .remove(b'.')
            .remove(b'!')
            .remove(b'~')
            .remove(b'*')
            .remove(b'\'')
            .remove(b'(')
            .remove(b')');

        format!(
            "https://www.google.com/maps/dir/?api=1&destination={},{}&destination_place_name={}",
            self.coords.lat,
            self.coords.lng,
            utf8_percent_encode(&self.name, COMPONENT)
        )
    }
}
