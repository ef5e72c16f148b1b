use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_DIRECTIVE: &str = "munch=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    fmt().with_env_filter(filter).with_target(false).init();
}
