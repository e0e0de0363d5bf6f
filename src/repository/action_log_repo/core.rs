use crate::domain::action_log::ActionLog;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::SecondsFormat;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// ActionLogRepository
// ==========================================
// Mapping only, no business rules
pub struct ActionLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ActionLogRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub(super) fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Writes
    // ==========================================

    /// Insert one log entry
    ///
    /// # Returns
    /// - `Ok(action_id)`
    /// - `Err(...)`: database error
    pub fn insert(&self, log: &ActionLog) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO action_log (
                action_id, action_type, action_ts, actor,
                course_id, section_id, payload_json, detail
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                log.action_id,
                log.action_type,
                log.action_ts.to_rfc3339_opts(SecondsFormat::Micros, true),
                log.actor,
                log.course_id,
                log.section_id,
                log.payload_json.as_ref().map(|v| v.to_string()),
                log.detail,
            ],
        )?;

        Ok(log.action_id.clone())
    }
}
