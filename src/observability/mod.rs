//! Observability setup for embedding hosts.

pub mod init;

pub use init::init_tracing;
