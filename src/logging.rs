// ==========================================
// Logging setup
// ==========================================
// tracing + tracing-subscriber
// RUST_LOG filters levels; HTU_SCHEDULE_LOG_FORMAT=json switches
// to one JSON object per line
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the global subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Read HTU_SCHEDULE_LOG_FORMAT (anything but "json" is text)
    pub fn from_env() -> Self {
        match std::env::var("HTU_SCHEDULE_LOG_FORMAT") {
            Ok(v) => Self::parse(&v),
            Err(_) => LogFormat::Text,
        }
    }

    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Install the global subscriber
///
/// # Environment
/// - RUST_LOG: level filter (default: info),
///   e.g. RUST_LOG=debug or RUST_LOG=htu_schedule=trace,perf=info
/// - HTU_SCHEDULE_LOG_FORMAT: "json" for structured output
///
/// # Example
/// ```no_run
/// use htu_schedule::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match LogFormat::from_env() {
        LogFormat::Json => {
            let _ = fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(false)
                .try_init();
        }
        LogFormat::Text => {
            let _ = fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .try_init();
        }
    }
}

/// Debug-level subscriber writing through the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
