//! Search layer: local suggestions and remote resolution.
//!
//! Two independent operations share this module: the synchronous suggestion
//! list rebuilt on every keystroke ([`suggest`]), and the asynchronous
//! geocoding flow with its last-submitted-wins guard ([`resolver`]). The wire
//! contract with the external geocoding service lives in [`geocode`].

pub mod geocode;
pub mod resolver;
pub mod suggest;

pub use geocode::{GeocodeHit, GeocodeOutcome, GeocodeRequest};
pub use resolver::{ResolvedPoint, SearchResolver};
pub use suggest::{suggestions, Suggestion};
