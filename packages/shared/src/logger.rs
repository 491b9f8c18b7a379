//! Logging setup utilities for the session hub.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// `crate_names` lists the crates whose events are enabled when `RUST_LOG`
/// is not set; dashes are normalized to underscores to match tracing
/// targets. The `RUST_LOG` environment variable overrides the default.
///
/// # Arguments
///
/// * `crate_names` - The crates to enable by default (e.g., `&[env!("CARGO_CRATE_NAME")]`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
pub fn setup_logger(crate_names: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(crate_names, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_directives(crate_names: &[&str], default_log_level: &str) -> String {
    crate_names
        .iter()
        .map(|name| format!("{}={}", name.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}
