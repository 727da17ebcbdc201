use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "info,tower_http=info,sqlx=warn";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Calling this more than once is a
/// no-op, which keeps integration tests that share a process happy.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
