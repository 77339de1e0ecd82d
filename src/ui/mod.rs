//! UI boundary: display-ready view models and the persisted theme preference.
//!
//! Nothing in this module draws anything. Rendering belongs to the host; the
//! engine only projects state into [`viewmodel`] types and keeps the user's
//! [`theme`] choice.

pub mod theme;
pub mod viewmodel;

pub use theme::ThemeMode;
pub use viewmodel::{
    FavoriteCard, MachineCard, NotificationModel, SearchResultsPanel, SuggestionAction,
    SuggestionModel, VenueDetail, VenueListItem, ViewContent, ViewModel,
};
