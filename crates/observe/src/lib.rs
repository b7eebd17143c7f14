//! Tracing and metrics plumbing shared by all binaries.

pub mod metrics;

use {std::sync::Once, tracing_subscriber::EnvFilter};

static INIT: Once = Once::new();

/// Installs the global tracing subscriber. `filter` is an env-filter
/// directive string (e.g. "info,collector=debug"); the `RUST_LOG` variable
/// overrides it when set. Safe to call more than once.
pub fn initialize(filter: &str) {
    INIT.call_once(|| {
        let filter = match std::env::var("RUST_LOG") {
            Ok(value) => EnvFilter::new(value),
            Err(_) => EnvFilter::new(filter),
        };
        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_reentrant() {
        initialize("debug");
        initialize("info");
    }
}
