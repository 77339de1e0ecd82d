//! Tracing initialization and subscriber setup.
//!
//! The engine logs through `tracing` macros everywhere; this module wires a
//! subscriber for hosts that don't install their own. Embedding hosts with an
//! existing subscriber can skip this entirely — every span and event still
//! flows to whatever is installed.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::EngineConfig;

/// Initializes a fmt-layer tracing subscriber.
///
/// # Level Resolution
///
/// 1. `config.trace_level` if set
/// 2. The `RUST_LOG` environment variable
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times, only the first call takes effect.
/// Never panics if a subscriber is already installed.
pub fn init_tracing(config: &EngineConfig) {
    let filter = config
        .trace_level
        .as_deref()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false));

    let _ = subscriber.try_init();
}
