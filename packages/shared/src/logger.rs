//! Logger setup built on `tracing-subscriber`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set. Otherwise the crate named `name`
/// (and the server library) log at `default_level`, everything else at `warn`.
pub fn setup_logger(name: &str, default_level: &str) {
    let crate_name = name.replace('-', "_");
    let fallback = format!(
        "warn,{crate_name}={default_level},callroom_server={default_level},tower_http={default_level}"
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // try_init so tests that call this more than once do not panic
    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
    {
        tracing::debug!("Logger initialized for {}", name);
    }
}
