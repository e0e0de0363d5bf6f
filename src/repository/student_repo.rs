// ==========================================
// HTU Schedule - student repository
// ==========================================
// students table: insert-only records, one per registration
// created_at is stored as fixed-width RFC 3339 text (sortable)
// ==========================================

use crate::domain::catalog::Student;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, params_from_iter, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str =
    "id, name, university_id, major, advisor, section_id, created_at";

// ==========================================
// StudentRepository
// ==========================================
pub struct StudentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StudentRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Insert one student record
    ///
    /// # Returns
    /// - `Ok(id)`
    /// - `Err(ForeignKeyViolation)`: the section no longer exists
    pub fn insert(&self, student: &Student) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO students (id, name, university_id, major, advisor, section_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                student.id,
                student.name,
                student.university_id,
                student.major,
                student.advisor,
                student.section_id,
                student.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ],
        )?;
        Ok(student.id.clone())
    }

    /// Every registration of a university id, earliest first
    pub fn find_by_university_id(&self, university_id: &str) -> RepositoryResult<Vec<Student>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM students WHERE university_id = ?1 ORDER BY created_at, rowid",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![university_id], map_student)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// Students of a section in registration order
    pub fn find_by_section(&self, section_id: &str) -> RepositoryResult<Vec<Student>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM students WHERE section_id = ?1 ORDER BY rowid",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![section_id], map_student)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// All students in registration order
    pub fn find_all(&self) -> RepositoryResult<Vec<Student>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM students ORDER BY rowid", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], map_student)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// Number of students referencing any of the given sections
    pub fn count_by_sections(&self, section_ids: &[String]) -> RepositoryResult<usize> {
        if section_ids.is_empty() {
            return Ok(0);
        }
        let conn = self.get_conn()?;
        let placeholders = vec!["?"; section_ids.len()].join(", ");
        let sql = format!(
            "SELECT COUNT(*) FROM students WHERE section_id IN ({})",
            placeholders
        );
        let count: i64 = conn.query_row(&sql, params_from_iter(section_ids.iter()), |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }
}

fn map_student(row: &Row<'_>) -> SqliteResult<Student> {
    let created_raw: String = row.get(6)?;
    let created_at = DateTime::parse_from_rfc3339(&created_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        university_id: row.get(2)?,
        major: row.get(3)?,
        advisor: row.get(4)?,
        section_id: row.get(5)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn setup() -> StudentRepository {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::init_schema(&conn).unwrap();
        conn.execute_batch(
            r#"
            INSERT INTO departments (id, name_en, name_ar) VALUES ('D1', 'Computer Science', 'x');
            INSERT INTO courses (id, dept_id, name_en, name_ar) VALUES ('C1', 'D1', 'Programming', 'Programming');
            INSERT INTO sections (id, course_id, section_number, capacity, enrolled) VALUES ('S1', 'C1', 1, 20, 0);
            INSERT INTO sections (id, course_id, section_number, capacity, enrolled) VALUES ('S2', 'C1', 2, 20, 0);
            "#,
        )
        .unwrap();
        StudentRepository::new(Arc::new(Mutex::new(conn)))
    }

    fn student(id: &str, uid: &str, section_id: &str, created_at: DateTime<Utc>) -> Student {
        Student {
            id: id.to_string(),
            name: format!("Student {}", id),
            university_id: uid.to_string(),
            major: "CS".to_string(),
            advisor: "Dr. Omar".to_string(),
            section_id: section_id.to_string(),
            created_at,
        }
    }

    #[test]
    fn test_insert_and_find_by_university_id() {
        let repo = setup();
        let t0 = Utc::now();
        repo.insert(&student("B", "2021001", "S2", t0 + Duration::seconds(5)))
            .unwrap();
        repo.insert(&student("A", "2021001", "S1", t0)).unwrap();
        repo.insert(&student("C", "2021999", "S1", t0)).unwrap();

        let found = repo.find_by_university_id("2021001").unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, "A");
        assert_eq!(found[1].id, "B");
        assert!(repo.find_by_university_id("missing").unwrap().is_empty());
    }

    #[test]
    fn test_created_at_round_trip() {
        let repo = setup();
        let t0 = DateTime::parse_from_rfc3339("2024-09-01T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        repo.insert(&student("A", "U1", "S1", t0)).unwrap();
        assert_eq!(repo.find_by_section("S1").unwrap()[0].created_at, t0);
    }

    #[test]
    fn test_insert_into_missing_section_fails() {
        let repo = setup();
        let err = repo
            .insert(&student("A", "U1", "gone", Utc::now()))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));
    }

    #[test]
    fn test_count_by_sections() {
        let repo = setup();
        let now = Utc::now();
        repo.insert(&student("A", "U1", "S1", now)).unwrap();
        repo.insert(&student("B", "U2", "S1", now)).unwrap();
        repo.insert(&student("C", "U3", "S2", now)).unwrap();

        assert_eq!(repo.count_by_sections(&["S1".to_string()]).unwrap(), 2);
        assert_eq!(
            repo.count_by_sections(&["S1".to_string(), "S2".to_string()])
                .unwrap(),
            3
        );
        assert_eq!(repo.count_by_sections(&[]).unwrap(), 0);
        assert_eq!(repo.find_all().unwrap().len(), 3);
    }
}
