//! Structured logging with `tracing`.
//!
//! The hook talks to its host over stdout, so every diagnostic goes to
//! stderr. Warnings about malformed rules and bad patterns are the main
//! traffic; the default level is `warn`.

pub mod test_utils;

pub use test_utils::{CapturedEvent, CapturedLogs, capture_logs};

/// Default filter when neither `RUST_LOG` nor an explicit level is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Initialize the global tracing subscriber with stderr output only.
///
/// `RUST_LOG` wins over `level` when set. Subsequent calls are no-ops.
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .compact();

    // set_global_default is a no-op if already set
    let _ = subscriber.try_init();
}
