//! Diagnostic logging through `tracing`
//!
//! User-facing output goes through cliclack; tracing events are for diagnosing a run and
//! stay quiet unless `--debug` or `RUST_LOG` asks for them.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

static INIT: OnceLock<()> = OnceLock::new();

/// Install the global subscriber. Safe to call more than once.
///
/// Filter precedence: `RUST_LOG`, then the `debug` flag, then `warn`.
pub fn init(debug: bool) {
    INIT.get_or_init(|| {
        let fallback = if debug { "stackcraft_core=debug" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        let subscriber = Registry::default().with(filter).with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        );

        // Ignore error if a subscriber is already set (e.g., tests).
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
