//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, the binary's own crate logs at
/// `default_level` while dependencies stay at `info`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let (filter, source) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, "RUST_LOG"),
        Err(_) => (default_filter(bin_name, default_level), "default"),
    };
    let directives = filter.to_string();

    // try_init so that tests calling this twice do not panic
    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
    {
        tracing::debug!(source, filter = %directives, "Logger initialized");
    }
}

fn default_filter(bin_name: &str, default_level: &str) -> EnvFilter {
    let crate_target = bin_name.replace('-', "_");
    EnvFilter::new(format!(
        "info,{crate_target}={default_level},tower_http={default_level}"
    ))
}
