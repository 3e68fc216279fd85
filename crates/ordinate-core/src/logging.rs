//! Logging setup on top of `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor an explicit filter is given.
pub const DEFAULT_FILTER: &str = "info,ordinate_geometry=debug";

/// Install a global `fmt` subscriber with [`DEFAULT_FILTER`], honouring
/// `RUST_LOG` when it is set.
///
/// # Panics
///
/// Panics if a global subscriber is already installed. Use
/// [`try_init_with_filter`] where that can happen, e.g. in tests.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Install a global `fmt` subscriber with an explicit filter directive.
pub fn init_with_filter(filter: &str) {
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Like [`init_with_filter`] but returns an error instead of panicking when a
/// subscriber is already installed.
pub fn try_init_with_filter(filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
}
