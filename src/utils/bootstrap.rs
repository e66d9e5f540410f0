//! Bootstrap utilities for rustodon-features binaries and test targets.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LOG_ENV_VAR;

/// Initialize tracing with the RUSTODON_FEATURES_LOG environment variable.
///
/// Defaults to "info" level if RUSTODON_FEATURES_LOG is not set. Calling it
/// twice is harmless; the second subscriber is ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
