//! Logging initialization for sema components.
//!
//! All binaries log through `tracing` with an `EnvFilter`. Production
//! deployments emit JSON lines; development runs get a human-readable
//! format. Library crates never install a subscriber themselves.

use std::sync::Once;

use tracing::Span;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON structured logs (for production).
    Json,
    /// Compact human-readable logs (for development).
    #[default]
    Compact,
}

/// Initializes the logging subsystem.
///
/// Call once at application startup. Safe to call multiple times;
/// subsequent calls are no-ops. Log levels are controlled through
/// `RUST_LOG` (e.g. `info`, `sema_registry=debug`), defaulting to `info`.
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json())
                    .init();
            }
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().compact().with_target(false))
                    .init();
            }
        }
    });
}

/// Creates a span covering the consumption of a single log record.
///
/// # Example
///
/// ```rust
/// use sema_core::observability::consume_span;
///
/// let span = consume_span("schema_update", Some(42));
/// let _guard = span.enter();
/// ```
#[must_use]
pub fn consume_span(topic: &str, offset: Option<u64>) -> Span {
    tracing::info_span!("consume", topic = topic, offset = offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(LogFormat::Compact);
        init_logging(LogFormat::Compact);
    }

    #[test]
    fn consume_span_records_topic() {
        let span = consume_span("schema_update", Some(7));
        let _guard = span.enter();
        tracing::info!("record consumed");
    }
}
