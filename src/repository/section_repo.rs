// ==========================================
// HTU Schedule - section repository
// ==========================================
// sections table: reads, counters, bulk insert, delete by ids
// Every method is one statement (or one batch transaction);
// composing them into workflows is the engine's job
// ==========================================

use crate::domain::catalog::Section;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = "id, course_id, section_number, capacity, enrolled";

// ==========================================
// SectionRepository
// ==========================================
pub struct SectionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SectionRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Queries
    // ==========================================

    pub fn find_by_id(&self, section_id: &str) -> RepositoryResult<Option<Section>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM sections WHERE id = ?1", SELECT_COLUMNS);
        let section = conn
            .query_row(&sql, params![section_id], map_section)
            .optional()?;
        Ok(section)
    }

    /// Sections of a course ordered by section number
    pub fn find_by_course(&self, course_id: &str) -> RepositoryResult<Vec<Section>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM sections WHERE course_id = ?1 ORDER BY section_number, rowid",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![course_id], map_section)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn find_all(&self) -> RepositoryResult<Vec<Section>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM sections ORDER BY course_id, section_number, rowid",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], map_section)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// Highest section number of a course (0 when it has none)
    pub fn max_section_number(&self, course_id: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let max: i64 = conn.query_row(
            "SELECT COALESCE(MAX(section_number), 0) FROM sections WHERE course_id = ?1",
            params![course_id],
            |row| row.get(0),
        )?;
        Ok(max)
    }

    pub fn find_ids_by_course(&self, course_id: &str) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id FROM sections WHERE course_id = ?1")?;
        let ids = stmt
            .query_map(params![course_id], |row| row.get(0))?
            .collect::<SqliteResult<Vec<String>>>()?;
        Ok(ids)
    }

    // ==========================================
    // Writes
    // ==========================================

    /// Insert sections in one transaction
    pub fn insert_batch(&self, sections: &[Section]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO sections (id, course_id, section_number, capacity, enrolled)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for s in sections {
                stmt.execute(params![s.id, s.course_id, s.section_number, s.capacity, s.enrolled])?;
                count += 1;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    /// Overwrite the enrolled counter
    pub fn update_enrolled(&self, section_id: &str, enrolled: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "UPDATE sections SET enrolled = ?2 WHERE id = ?1",
            params![section_id, enrolled],
        )?;
        ensure_one(rows, section_id)
    }

    /// Overwrite the capacity
    pub fn update_capacity(&self, section_id: &str, capacity: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "UPDATE sections SET capacity = ?2 WHERE id = ?1",
            params![section_id, capacity],
        )?;
        ensure_one(rows, section_id)
    }

    /// Guarded increment: only succeeds while a seat is free
    ///
    /// # Returns
    /// - `Ok(true)`: one seat taken
    /// - `Ok(false)`: section full (or missing)
    pub fn try_increment_enrolled(&self, section_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "UPDATE sections SET enrolled = enrolled + 1 WHERE id = ?1 AND enrolled < capacity",
            params![section_id],
        )?;
        Ok(rows == 1)
    }

    /// Guarded decrement: never drops below zero
    pub fn decrement_enrolled(&self, section_id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "UPDATE sections SET enrolled = enrolled - 1 WHERE id = ?1 AND enrolled > 0",
            params![section_id],
        )?;
        Ok(rows == 1)
    }

    /// Delete sections by id; students go with them (ON DELETE CASCADE)
    pub fn delete_by_ids(&self, ids: &[String]) -> RepositoryResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let conn = self.get_conn()?;
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM sections WHERE id IN ({})", placeholders);
        let rows = conn.execute(&sql, params_from_iter(ids.iter()))?;
        Ok(rows)
    }
}

fn ensure_one(rows: usize, section_id: &str) -> RepositoryResult<()> {
    if rows == 0 {
        return Err(RepositoryError::NotFound {
            entity: "Section".to_string(),
            id: section_id.to_string(),
        });
    }
    Ok(())
}

fn map_section(row: &Row<'_>) -> SqliteResult<Section> {
    Ok(Section {
        id: row.get(0)?,
        course_id: row.get(1)?,
        section_number: row.get(2)?,
        capacity: row.get(3)?,
        enrolled: row.get(4)?,
    })
}
