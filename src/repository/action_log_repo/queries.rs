use super::core::ActionLogRepository;
use crate::domain::action_log::ActionLog;
use crate::repository::error::RepositoryResult;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};

const SELECT_COLUMNS: &str =
    "action_id, action_type, action_ts, actor, course_id, section_id, payload_json, detail";

impl ActionLogRepository {
    // ==========================================
    // Queries
    // ==========================================

    pub fn find_by_id(&self, action_id: &str) -> RepositoryResult<Option<ActionLog>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM action_log WHERE action_id = ?", SELECT_COLUMNS);
        let log = conn
            .query_row(&sql, params![action_id], |row| self.map_row(row))
            .optional()?;
        Ok(log)
    }

    /// Most recent entries first
    pub fn find_recent(&self, limit: i32) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM action_log ORDER BY action_ts DESC, rowid DESC LIMIT ?",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![limit], |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(logs)
    }

    /// Entries of one action type, most recent first
    pub fn find_by_action_type(
        &self,
        action_type: &str,
        limit: i32,
    ) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM action_log WHERE action_type = ? ORDER BY action_ts DESC, rowid DESC LIMIT ?",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![action_type, limit], |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(logs)
    }

    /// Entries touching one course, most recent first
    pub fn find_by_course(&self, course_id: &str) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM action_log WHERE course_id = ? ORDER BY action_ts DESC, rowid DESC",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![course_id], |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(logs)
    }

    pub fn count_by_action_type(&self, action_type: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM action_log WHERE action_type = ?",
            params![action_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ==========================================
    // Row mapping
    // ==========================================

    fn map_row(&self, row: &Row) -> SqliteResult<ActionLog> {
        let action_ts_str: String = row.get(2)?;
        let action_ts = DateTime::parse_from_rfc3339(&action_ts_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
            })?;

        // Unparseable payloads are dropped rather than failing the read
        let payload_json = row
            .get::<_, Option<String>>(6)?
            .and_then(|s| serde_json::from_str(&s).ok());

        Ok(ActionLog {
            action_id: row.get(0)?,
            action_type: row.get(1)?,
            action_ts,
            actor: row.get(3)?,
            course_id: row.get(4)?,
            section_id: row.get(5)?,
            payload_json,
            detail: row.get(7)?,
        })
    }
}
