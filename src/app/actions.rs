//! Actions representing side effects to be executed by the host runtime.
//!
//! This module defines the [`Action`] type, the imperative commands produced by
//! the event handler after processing an event. Actions are the engine's only
//! way to reach outside the process boundary: everything else (markers, view
//! state, persistence) happens inline on the event thread.
//!
//! The handler returns a `Vec<Action>` per event; the host executes them in
//! sequence.

use crate::search::GeocodeRequest;

/// Commands for the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Performs one outbound geocoding request.
    ///
    /// The host sends the query to its geocoding service and, whenever the
    /// transport settles, feeds the outcome back as
    /// [`Event::GeocodeCompleted`](crate::app::Event::GeocodeCompleted) with
    /// the request's `seq` echoed unchanged. There is no cancellation; a
    /// superseded request's completion is simply discarded on arrival.
    Geocode(GeocodeRequest),

    /// Opens an external navigation deep link in a new context.
    ///
    /// Fire-and-forget; no response is handled.
    OpenDirections {
        /// Fully formed navigation URL.
        url: String,
    },
}
