//! # Observability & Tracing
//!
//! Structured-logging setup for applications embedding the engine.
//!
//! ## What Gets Traced
//!
//! - **Configuration**: metadata registrations and strategy (re)bindings
//! - **Generation**: one `debug` event per resource with its type key and
//!   metadata kind, including recursive embeds
//! - **Failures**: `warn` events with the offending type key before the
//!   error propagates
//!
//! ## Usage
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo test
//!
//! # Show per-resource generation events
//! RUST_LOG=debug cargo test
//!
//! # Filter to the engine only
//! RUST_LOG=hal_engine::framework=debug cargo test
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Structured fields carry the type key already
        .compact()
        .init();
}
