// ==========================================
// HTU Schedule - catalog repository
// ==========================================
// departments / courses tables, plus the transactional catalog seed
// Repository holds no business rules: mapping only
// ==========================================

use crate::domain::catalog::{Course, Department, Section};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

/// One department with its courses and their sections, ready to insert
#[derive(Debug, Clone)]
pub struct CatalogBatch {
    pub department: Department,
    pub courses: Vec<(Course, Vec<Section>)>,
}

// ==========================================
// CatalogRepository
// ==========================================
pub struct CatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Departments
    // ==========================================

    /// All departments ordered by English name
    pub fn find_all_departments(&self) -> RepositoryResult<Vec<Department>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name_en, name_ar FROM departments ORDER BY name_en, rowid")?;
        let rows = stmt
            .query_map([], map_department)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn find_department(&self, dept_id: &str) -> RepositoryResult<Option<Department>> {
        let conn = self.get_conn()?;
        let dept = conn
            .query_row(
                "SELECT id, name_en, name_ar FROM departments WHERE id = ?1",
                params![dept_id],
                map_department,
            )
            .optional()?;
        Ok(dept)
    }

    /// True when no department exists yet
    pub fn is_empty(&self) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let any: Option<i64> = conn
            .query_row("SELECT 1 FROM departments LIMIT 1", [], |row| row.get(0))
            .optional()?;
        Ok(any.is_none())
    }

    pub fn insert_department(&self, dept: &Department) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO departments (id, name_en, name_ar) VALUES (?1, ?2, ?3)",
            params![dept.id, dept.name_en, dept.name_ar],
        )?;
        Ok(())
    }

    // ==========================================
    // Courses
    // ==========================================

    /// Courses of a department ordered by English name
    pub fn find_courses_by_department(&self, dept_id: &str) -> RepositoryResult<Vec<Course>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, dept_id, name_en, name_ar
            FROM courses
            WHERE dept_id = ?1
            ORDER BY name_en, rowid
            "#,
        )?;
        let rows = stmt
            .query_map(params![dept_id], map_course)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// All courses in insertion (catalog) order
    pub fn find_all_courses(&self) -> RepositoryResult<Vec<Course>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, dept_id, name_en, name_ar FROM courses ORDER BY rowid")?;
        let rows = stmt
            .query_map([], map_course)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn find_course(&self, course_id: &str) -> RepositoryResult<Option<Course>> {
        let conn = self.get_conn()?;
        let course = conn
            .query_row(
                "SELECT id, dept_id, name_en, name_ar FROM courses WHERE id = ?1",
                params![course_id],
                map_course,
            )
            .optional()?;
        Ok(course)
    }

    pub fn insert_course(&self, course: &Course) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO courses (id, dept_id, name_en, name_ar) VALUES (?1, ?2, ?3, ?4)",
            params![course.id, course.dept_id, course.name_en, course.name_ar],
        )?;
        Ok(())
    }

    // ==========================================
    // Seed
    // ==========================================

    /// Insert a whole catalog in one transaction
    ///
    /// # Returns
    /// - `Ok((departments, courses, sections))`: inserted row counts
    /// - `Err(...)`: nothing was written
    pub fn insert_catalog(&self, batches: &[CatalogBatch]) -> RepositoryResult<(usize, usize, usize)> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let (mut depts, mut courses, mut sections) = (0usize, 0usize, 0usize);
        {
            let mut dept_stmt =
                tx.prepare("INSERT INTO departments (id, name_en, name_ar) VALUES (?1, ?2, ?3)")?;
            let mut course_stmt = tx.prepare(
                "INSERT INTO courses (id, dept_id, name_en, name_ar) VALUES (?1, ?2, ?3, ?4)",
            )?;
            let mut section_stmt = tx.prepare(
                r#"
                INSERT INTO sections (id, course_id, section_number, capacity, enrolled)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;

            for batch in batches {
                let d = &batch.department;
                dept_stmt.execute(params![d.id, d.name_en, d.name_ar])?;
                depts += 1;

                for (course, course_sections) in &batch.courses {
                    course_stmt.execute(params![
                        course.id,
                        course.dept_id,
                        course.name_en,
                        course.name_ar
                    ])?;
                    courses += 1;

                    for s in course_sections {
                        section_stmt.execute(params![
                            s.id,
                            s.course_id,
                            s.section_number,
                            s.capacity,
                            s.enrolled
                        ])?;
                        sections += 1;
                    }
                }
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok((depts, courses, sections))
    }
}

fn map_department(row: &Row<'_>) -> SqliteResult<Department> {
    Ok(Department {
        id: row.get(0)?,
        name_en: row.get(1)?,
        name_ar: row.get(2)?,
    })
}

fn map_course(row: &Row<'_>) -> SqliteResult<Course> {
    Ok(Course {
        id: row.get(0)?,
        dept_id: row.get(1)?,
        name_en: row.get(2)?,
        name_ar: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> CatalogRepository {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::init_schema(&conn).unwrap();
        CatalogRepository::new(Arc::new(Mutex::new(conn)))
    }

    fn dept(id: &str, name: &str) -> Department {
        Department {
            id: id.to_string(),
            name_en: name.to_string(),
            name_ar: name.to_string(),
        }
    }

    fn course(id: &str, dept_id: &str, name: &str) -> Course {
        Course {
            id: id.to_string(),
            dept_id: dept_id.to_string(),
            name_en: name.to_string(),
            name_ar: name.to_string(),
        }
    }

    #[test]
    fn test_departments_ordered_by_name() {
        let repo = setup();
        assert!(repo.is_empty().unwrap());
        repo.insert_department(&dept("D2", "Cyber Security")).unwrap();
        repo.insert_department(&dept("D1", "Common Courses")).unwrap();
        repo.insert_department(&dept("D3", "Computer Science")).unwrap();

        let names: Vec<String> = repo
            .find_all_departments()
            .unwrap()
            .into_iter()
            .map(|d| d.name_en)
            .collect();
        assert_eq!(names, vec!["Common Courses", "Computer Science", "Cyber Security"]);
        assert!(!repo.is_empty().unwrap());
    }

    #[test]
    fn test_courses_by_department_and_insertion_order() {
        let repo = setup();
        repo.insert_department(&dept("D1", "Computer Science")).unwrap();
        repo.insert_course(&course("C1", "D1", "Programming")).unwrap();
        repo.insert_course(&course("C2", "D1", "Operating Systems")).unwrap();

        let by_dept = repo.find_courses_by_department("D1").unwrap();
        assert_eq!(by_dept[0].name_en, "Operating Systems");
        assert_eq!(by_dept[1].name_en, "Programming");

        let all = repo.find_all_courses().unwrap();
        assert_eq!(all[0].id, "C1");
        assert_eq!(all[1].id, "C2");

        assert!(repo.find_course("C2").unwrap().is_some());
        assert!(repo.find_course("nope").unwrap().is_none());
    }

    #[test]
    fn test_insert_catalog_is_atomic() {
        let repo = setup();
        let d = dept("D1", "Computer Science");
        let c = course("C1", "D1", "Programming");
        let sections = vec![Section::new("C1", 1, 20), Section::new("C1", 2, 20)];
        let ok = CatalogBatch {
            department: d.clone(),
            courses: vec![(c.clone(), sections)],
        };
        assert_eq!(repo.insert_catalog(&[ok]).unwrap(), (1, 1, 2));

        // Second batch reuses D1: the whole call must roll back
        let fresh = dept("D9", "Data Science & AI");
        let bad = vec![
            CatalogBatch {
                department: fresh,
                courses: vec![],
            },
            CatalogBatch {
                department: d,
                courses: vec![],
            },
        ];
        assert!(repo.insert_catalog(&bad).is_err());
        assert!(repo.find_department("D9").unwrap().is_none());
    }
}
