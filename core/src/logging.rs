//! Optional log setup for binaries and tests.
//!
//! The library only emits `tracing` events; it never installs a subscriber on
//! its own. Hosts that have no subscriber of their own can call `init`.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG` (default `cma_core=info`).
/// Calling it again, or after another subscriber was installed, is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cma_core=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
