//! Local search suggestions.
//!
//! Synchronous, no I/O: given the current input text, build the ordered
//! suggestion list from the catalog. The list is recomputed in full on every
//! call — no incremental diffing — which keeps the logic trivially restartable
//! on each keystroke.

use crate::domain::{CatalogStore, VenueId};

/// Inputs shorter than this (in characters) do not get the remote-search
/// affordance.
const MIN_REMOTE_QUERY_CHARS: usize = 3;

/// One entry in the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// "Search the map for this text" — promotes the query to a remote
    /// geocoding submission.
    ResolveRemote {
        /// The raw query to submit.
        query: String,
    },
    /// A catalog venue whose name or address contains the input.
    Venue {
        /// Id of the matching venue.
        id: VenueId,
        /// Venue display name.
        name: String,
        /// Venue address.
        address: String,
    },
    /// A popular query offered when the input is empty.
    Popular {
        /// The canned query text.
        query: String,
    },
}

/// Builds the suggestion list for the current input.
///
/// Ordering: the remote-search affordance first (only when the input is longer
/// than two characters), then matching catalog venues in catalog order, then
/// the popular fallback queries (only when the input is empty — in which case
/// every venue also matches the empty needle and is listed).
#[must_use]
pub fn suggestions(catalog: &CatalogStore, input: &str, popular: &[String]) -> Vec<Suggestion> {
    let mut list = Vec::new();

    if input.chars().count() >= MIN_REMOTE_QUERY_CHARS {
        list.push(Suggestion::ResolveRemote {
            query: input.to_string(),
        });
    }

    for venue in catalog.venues() {
        if venue.matches_text(input) {
            list.push(Suggestion::Venue {
                id: venue.id,
                name: venue.name.clone(),
                address: venue.address.clone(),
            });
        }
    }

    if input.is_empty() {
        for query in popular {
            list.push(Suggestion::Popular {
                query: query.clone(),
            });
        }
    }

    list
}
