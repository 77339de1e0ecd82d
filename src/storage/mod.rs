//! Storage layer: the key-value abstraction, its backends, and the favorites set.

pub mod backend;
pub mod favorites;
pub mod json;
pub mod memory;

pub use backend::{KeyValueStore, FAVORITES_KEY, THEME_KEY};
pub use favorites::FavoritesStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
