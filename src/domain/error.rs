//! Error types for the pinfinder engine.
//!
//! This module defines the centralized error type [`PinfinderError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Per the engine's error-handling design, none of these errors is fatal: every
//! variant is recovered at the boundary where it is detected and converted into a
//! notification or a no-op. Not-found results and stale references are not errors
//! at all and never appear here.

use thiserror::Error;

/// The main error type for pinfinder engine operations.
///
/// This enum consolidates all error conditions that can occur while the engine is
/// running, from persistence failures to malformed configuration. Variants wrapping
/// underlying errors from external crates use `#[from]` for automatic conversion.
#[derive(Debug, Error)]
pub enum PinfinderError {
    /// Durable key-value storage operation failed.
    ///
    /// Occurs when reading from or writing to the storage backend fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The geocoding response could not be interpreted.
    ///
    /// Occurs when a resolved hit carries coordinates the engine cannot parse.
    /// Transport failures are NOT represented here; they arrive as a first-class
    /// [`GeocodeOutcome`](crate::search::GeocodeOutcome) variant instead.
    #[error("Geocode error: {0}")]
    Geocode(String),
}

/// A specialized `Result` type for pinfinder operations.
///
/// This is a type alias for `std::result::Result<T, PinfinderError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, PinfinderError>;
