//! Tracing/logging initialization.
//!
//! The filter comes from `RUST_LOG` (default `info`). Output is JSON unless
//! `AVATAX_LOG_FORMAT=pretty`.

use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line, for log shippers.
    #[default]
    Json,
    /// Human-readable, for local development.
    Pretty,
}

impl LogFormat {
    /// Read from `AVATAX_LOG_FORMAT`; anything other than `pretty` means JSON.
    pub fn from_env() -> Self {
        match std::env::var("AVATAX_LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    init_with(filter, LogFormat::from_env());
}

/// Initialize with an explicit filter and format.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_with(filter: EnvFilter, format: LogFormat) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Pretty => builder.pretty().try_init().is_ok(),
    }
}
