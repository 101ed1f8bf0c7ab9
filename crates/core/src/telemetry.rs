//! Telemetry initialisation for processes embedding the crypto core.
//!
//! Structured JSON logs to stdout. The core itself only emits `tracing`
//! events and spans carrying lengths and algorithm names; key material,
//! plaintext and error details never appear in them.

use anyhow::Result;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Install the process-wide JSON subscriber for a host embedding the library.
///
/// The host calls this once at startup, usually with
/// [`crate::CryptoConfig::log_level`]. Hosts that already install their own
/// subscriber skip it; the core's spans and events flow into whichever
/// subscriber is active. `RUST_LOG` takes precedence over `log_level` when set.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    subscriber(log_level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}

fn subscriber(log_level: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    // Scoped to the test thread so no global subscriber leaks into other tests.
    #[test]
    fn subscriber_honours_log_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let _guard = tracing::subscriber::set_default(subscriber("warn"));
        assert!(tracing::enabled!(Level::WARN));
        assert!(tracing::enabled!(Level::ERROR));
        assert!(!tracing::enabled!(Level::INFO));
        assert!(!tracing::enabled!(Level::DEBUG));
    }

    #[test]
    fn debug_level_enables_core_events() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let _guard = tracing::subscriber::set_default(subscriber("debug"));
        assert!(tracing::enabled!(Level::DEBUG));
        assert!(!tracing::enabled!(Level::TRACE));
    }
}
