//! Tracing setup.
//!
//! Console subscriber with `RUST_LOG`-style filtering.

use tracing_subscriber::EnvFilter;

/// Initialize console tracing.
///
/// Filter comes from `RUST_LOG`, defaulting to `info`. Safe to call once
/// at process start; later calls are ignored.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}
