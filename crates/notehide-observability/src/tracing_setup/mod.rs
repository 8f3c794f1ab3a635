//! Tracing setup: fmt subscriber with env-overridable filtering.

pub mod spans;

use std::sync::Once;

use notehide_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "NOTEHIDE_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `NOTEHIDE_LOG` (same syntax as `RUST_LOG`) takes precedence over
/// `config.log_level`. Idempotent; also a no-op if the embedder already
/// installed a subscriber.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let result = if config.json_logs {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).json())
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true))
                .with(filter)
                .try_init()
        };
        if result.is_err() {
            tracing::debug!("global subscriber already set, keeping it");
        }
    });
}
