// ==========================================
// HTU Schedule - SQLite connection and schema
// ==========================================
// Goals:
// - every Connection::open goes through the same PRAGMA setup
// - one busy_timeout for all connections
// - idempotent schema bootstrap (CREATE ... IF NOT EXISTS)
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// Default busy_timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// schema_version written by `init_schema`
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Apply the per-connection PRAGMAs
///
/// foreign_keys and busy_timeout are connection scoped in SQLite
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the shared configuration
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Read schema_version (None when the table does not exist)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// Create all tables and indexes if missing, then stamp the schema version
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    let current = read_schema_version(conn)?;
    if current.map_or(true, |v| v < CURRENT_SCHEMA_VERSION) {
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
            [CURRENT_SCHEMA_VERSION],
        )?;
    }
    Ok(())
}

// ==========================================
// Schema
// ==========================================
// Sections carry no UNIQUE(course_id, section_number): numbering is
// maintained by the section lifecycle workflows only.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version     INTEGER PRIMARY KEY,
    applied_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS config_kv (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS departments (
    id       TEXT PRIMARY KEY,
    name_en  TEXT NOT NULL,
    name_ar  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS courses (
    id       TEXT PRIMARY KEY,
    dept_id  TEXT NOT NULL REFERENCES departments(id) ON DELETE CASCADE,
    name_en  TEXT NOT NULL,
    name_ar  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sections (
    id              TEXT PRIMARY KEY,
    course_id       TEXT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
    section_number  INTEGER NOT NULL,
    capacity        INTEGER NOT NULL CHECK (capacity >= 0),
    enrolled        INTEGER NOT NULL DEFAULT 0 CHECK (enrolled >= 0)
);

CREATE TABLE IF NOT EXISTS students (
    id             TEXT PRIMARY KEY,
    name           TEXT NOT NULL,
    university_id  TEXT NOT NULL,
    major          TEXT NOT NULL,
    advisor        TEXT NOT NULL,
    section_id     TEXT NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS action_log (
    action_id     TEXT PRIMARY KEY,
    action_type   TEXT NOT NULL,
    action_ts     TEXT NOT NULL,
    actor         TEXT NOT NULL,
    course_id     TEXT,
    section_id    TEXT,
    payload_json  TEXT,
    detail        TEXT
);

CREATE INDEX IF NOT EXISTS idx_courses_dept ON courses(dept_id);
CREATE INDEX IF NOT EXISTS idx_sections_course ON sections(course_id, section_number);
CREATE INDEX IF NOT EXISTS idx_students_section ON students(section_id);
CREATE INDEX IF NOT EXISTS idx_students_university_id ON students(university_id);
CREATE INDEX IF NOT EXISTS idx_action_log_ts ON action_log(action_ts);
"#;
