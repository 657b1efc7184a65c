//! Process-wide tracing setup for hosts embedding the builder core.
//!
//! The library crates only emit `tracing` events; whichever binary or test
//! harness hosts them decides where those events go by calling [`init`].

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Install JSON logging filtered by `RUST_LOG`.
///
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init() {
    init_with(LogFormat::default(), DEFAULT_FILTER);
}

/// Install a subscriber with an explicit format and fallback filter.
///
/// Returns `false` when a global subscriber was already set.
pub fn init_with(format: LogFormat, fallback_filter: &str) -> bool {
    let filter = env_filter(fallback_filter);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    installed.is_ok()
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}
