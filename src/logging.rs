//! Log setup for the `tracker` binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary so embedders can route logs their own way.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter, e.g. `TRACKER_LOG=debug`
pub const LOG_ENV_VAR: &str = "TRACKER_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `TRACKER_LOG`, falling back to warnings only
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stderr subscriber. Stdout is kept for listings and CSV.
pub fn setup_logging() {
    let stderr_log = fmt::layer().with_writer(std::io::stderr).with_target(false);

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_log)
        .try_init();
}
