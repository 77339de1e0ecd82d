//! Named views and routing state.
//!
//! Exactly one view is active at a time. Switching views is a plain state
//! change: the target view's content is recomputed by the view-model
//! projection, which is idempotent — re-projecting with unchanged state yields
//! an identical result, so there is no per-view load bookkeeping to invalidate.

/// The finite set of views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Map plus detail panel.
    #[default]
    Home,
    /// Search input, suggestions, and the filtered venue list.
    Search,
    /// All venues as a filtered list.
    Locations,
    /// Aggregated machine cards.
    Machines,
    /// Favorited venue cards.
    Favorites,
}

impl View {
    /// Page title shown for the view.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Pinball Locations",
            Self::Search => "Search Locations",
            Self::Locations => "All Locations",
            Self::Machines => "Pinball Machines",
            Self::Favorites => "Favorite Locations",
        }
    }
}
