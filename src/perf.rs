// ==========================================
// Performance instrumentation
// ==========================================
// PerfGuard: elapsed_ms + SQL statement counts per operation (target "perf")
// install_sqlite_tracing: rusqlite trace/profile hooks, slow SQL warnings
// (target "slow_sql")
// Counters are per thread; blocking-pool work opens its own guard.
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub const ENV_PERF_SQL: &str = "HTU_SCHEDULE_PERF_SQL";
pub const ENV_SLOW_SQL_MS: &str = "HTU_SCHEDULE_SLOW_SQL_MS";

const SQL_LOG_CHARS: usize = 420;

static SLOW_SQL_MS: AtomicU64 = AtomicU64::new(0);

/// Statement counters of the current thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SqlCounters {
    depth: u32,
    statements: u64,
    slow: u64,
}

thread_local! {
    static COUNTERS: Cell<SqlCounters> = Cell::new(SqlCounters::default());
}

fn update_counters(f: impl FnOnce(&mut SqlCounters)) {
    COUNTERS.with(|c| {
        let mut v = c.get();
        f(&mut v);
        c.set(v);
    });
}

fn counters() -> SqlCounters {
    COUNTERS.with(|c| c.get())
}

// ==========================================
// SqlTracingSettings
// ==========================================

/// SQL tracing switches
///
/// - on by default in debug builds, off in release
/// - `HTU_SCHEDULE_PERF_SQL=1` forces it on (`0` forces it off)
/// - `HTU_SCHEDULE_SLOW_SQL_MS=50` slow statement threshold (ms, 0 = never)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlTracingSettings {
    pub enabled: bool,
    pub slow_sql_ms: u64,
}

impl SqlTracingSettings {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(ENV_PERF_SQL).ok().as_deref(),
            std::env::var(ENV_SLOW_SQL_MS).ok().as_deref(),
        )
    }

    /// Build from raw switch values; malformed thresholds use the default
    pub fn from_values(perf_sql: Option<&str>, slow_sql_ms: Option<&str>) -> Self {
        let enabled = perf_sql.map_or(cfg!(debug_assertions), is_true);
        let default_ms = if cfg!(debug_assertions) { 50 } else { 200 };
        let slow_sql_ms = match slow_sql_ms.map(|v| v.trim().parse::<u64>()) {
            Some(Ok(ms)) => ms,
            Some(Err(_)) => {
                tracing::warn!(
                    var = ENV_SLOW_SQL_MS,
                    default_ms,
                    "malformed threshold, using default"
                );
                default_ms
            }
            None => default_ms,
        };
        Self {
            enabled,
            slow_sql_ms,
        }
    }
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// One-line SQL, cut at `max_chars` characters
fn truncate_sql(sql: &str, max_chars: usize) -> String {
    let s = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    if s.chars().count() <= max_chars {
        return s;
    }
    let cut: String = s.chars().take(max_chars).collect();
    format!("{}…", cut)
}

/// Install (or clear) rusqlite trace/profile callbacks on a connection
pub fn install_sqlite_tracing(conn: &mut Connection, settings: SqlTracingSettings) {
    SLOW_SQL_MS.store(settings.slow_sql_ms, Ordering::Relaxed);

    if settings.enabled {
        conn.trace(Some(on_statement));
        conn.profile(Some(on_profile));
    } else {
        conn.trace(None);
        conn.profile(None);
    }
    tracing::debug!(
        enabled = settings.enabled,
        slow_sql_ms = settings.slow_sql_ms,
        "sql tracing configured"
    );
}

fn on_statement(_sql: &str) {
    update_counters(|c| {
        if c.depth > 0 {
            c.statements = c.statements.saturating_add(1);
        }
    });
}

fn on_profile(sql: &str, duration: Duration) {
    let threshold = SLOW_SQL_MS.load(Ordering::Relaxed);
    let ms = duration.as_millis() as u64;
    if threshold == 0 || ms < threshold {
        return;
    }

    tracing::warn!(
        target: "slow_sql",
        duration_ms = ms,
        sql = %truncate_sql(sql, SQL_LOG_CHARS),
        "slow sql"
    );
    update_counters(|c| {
        if c.depth > 0 {
            c.slow = c.slow.saturating_add(1);
        }
    });
}

// ==========================================
// PerfGuard
// ==========================================

/// Per-operation timing guard, logs on drop
///
/// ```ignore
/// let _perf = htu_schedule::perf::PerfGuard::new("build_summary");
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    at_start: SqlCounters,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        update_counters(|c| c.depth = c.depth.saturating_add(1));
        Self {
            op,
            start: Instant::now(),
            at_start: counters(),
        }
    }

    /// Statements traced on this thread since the guard was created
    pub fn sql_count(&self) -> u64 {
        counters().statements.saturating_sub(self.at_start.statements)
    }

    fn slow_sql_count(&self) -> u64 {
        counters().slow.saturating_sub(self.at_start.slow)
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            sql_count = self.sql_count(),
            slow_sql_count = self.slow_sql_count(),
            "done"
        );
        update_counters(|c| c.depth = c.depth.saturating_sub(1));
    }
}
