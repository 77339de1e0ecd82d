//! Map-facing layer: the surface abstraction and marker reconciliation.
//!
//! The engine treats the interactive map as an external collaborator reached
//! through the [`MapSurface`] trait; [`MarkerSync`] keeps the surface's marker
//! set consistent with the currently filtered venue list.

pub mod surface;
pub mod sync;

pub use surface::{MapSurface, MarkerHandle, MarkerStyle};
pub use sync::MarkerSync;
