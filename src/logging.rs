//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Default filter when `--debug` is not given
pub const DEFAULT_LEVEL: &str = "warn";

/// Pick the log filter: `--debug` wins over the default, `RUST_LOG` wins over both
pub fn level_for(debug: bool) -> &'static str {
    if debug { "debug" } else { DEFAULT_LEVEL }
}

/// Install a compact stderr subscriber. Later calls are no-ops.
pub fn init_subscriber(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(true), "debug");
        assert_eq!(level_for(false), "warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_subscriber("info");
        init_subscriber("debug");
        tracing::info!("subscriber installed");
    }
}
