//! Geocoding request/response contract.
//!
//! The engine never performs the network call itself: submitting a search emits
//! [`Action::Geocode`](crate::app::Action::Geocode) carrying a [`GeocodeRequest`],
//! the host performs the transport however it likes, and the outcome comes back
//! as [`Event::GeocodeCompleted`](crate::app::Event::GeocodeCompleted) carrying a
//! [`GeocodeOutcome`]. Empty result lists and transport failures are first-class
//! outcomes, not exceptions.
//!
//! The hit shape mirrors the upstream service's wire format: an ordered list of
//! results with latitude/longitude as decimal strings. Only the first element is
//! ever used.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinates;

/// An outbound free-text geocoding request.
///
/// `seq` is the monotonically increasing submission number used to discard
/// out-of-order completions (last-submitted-wins); the host must echo it back
/// unchanged in the completion event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeRequest {
    /// Submission sequence number to echo back on completion.
    pub seq: u64,
    /// Free-text query to resolve.
    pub query: String,
}

/// One result row from the geocoding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeHit {
    /// Latitude as a decimal string, as sent on the wire.
    pub lat: String,
    /// Longitude as a decimal string, as sent on the wire.
    pub lon: String,
    /// Human-readable place label.
    pub display_name: String,
    /// Place category reported by the service.
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl GeocodeHit {
    /// Parses the wire-format coordinate strings into validated coordinates.
    ///
    /// Returns `None` when either component fails to parse or is out of
    /// range; callers treat such a hit as unusable rather than erroring.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        let lat: f64 = self.lat.trim().parse().ok()?;
        let lng: f64 = self.lon.trim().parse().ok()?;
        Coordinates::new(lat, lng).ok()
    }
}

/// Terminal outcome of one geocoding request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeocodeOutcome {
    /// The service answered. The list may be empty (query matched nothing).
    Resolved(Vec<GeocodeHit>),
    /// The transport failed or timed out. The string describes the failure
    /// for logging; it is never shown verbatim to the user.
    TransportFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_parses_wire_format_coordinates() {
        let hit = GeocodeHit {
            lat: "48.8566".to_string(),
            lon: "2.3522".to_string(),
            display_name: "Paris, France".to_string(),
            kind: "city".to_string(),
        };
        let coords = hit.coordinates().unwrap();
        assert!((coords.lat - 48.8566).abs() < 1e-9);
        assert!((coords.lng - 2.3522).abs() < 1e-9);
    }

    #[test]
    fn unparsable_or_out_of_range_coordinates_are_none() {
        let mut hit = GeocodeHit {
            lat: "not-a-number".to_string(),
            lon: "2.3522".to_string(),
            display_name: String::new(),
            kind: String::new(),
        };
        assert!(hit.coordinates().is_none());

        hit.lat = "123.0".to_string();
        assert!(hit.coordinates().is_none());
    }

    #[test]
    fn hit_deserializes_from_service_json() {
        let json = r#"{"lat":"48.8566","lon":"2.3522","display_name":"Paris, France","type":"city"}"#;
        let hit: GeocodeHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.display_name, "Paris, France");
        assert_eq!(hit.kind, "city");
    }
}
