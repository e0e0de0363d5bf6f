// ==========================================
// API integration test environment
// ==========================================
// A full AppState on a temporary database (catalog seeded),
// plus direct repository handles for arranging and asserting
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

pub use test_helpers::*;

use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

use htu_schedule::app::AppState;
use htu_schedule::config::config_manager::{config_keys, ConfigManager};
use htu_schedule::db::open_sqlite_connection;
use htu_schedule::domain::catalog::{Course, NewStudent, Section};
use htu_schedule::domain::types::EnrollmentMode;
use htu_schedule::repository::{
    ActionLogRepository, CatalogRepository, SectionRepository, StudentRepository,
};

pub struct ApiTestEnv {
    pub db_path: String,
    pub state: AppState,

    // Direct access for arranging / asserting
    pub catalog_repo: Arc<CatalogRepository>,
    pub section_repo: Arc<SectionRepository>,
    pub student_repo: Arc<StudentRepository>,
    pub action_log_repo: Arc<ActionLogRepository>,
    pub config: Arc<ConfigManager>,

    // Keeps the database file alive
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// Default settings (READ_THEN_WRITE, capacity 20)
    pub fn new() -> Result<Self, String> {
        Self::with_settings(&[])
    }

    pub fn with_mode(mode: EnrollmentMode) -> Result<Self, String> {
        Self::with_settings(&[(config_keys::ENROLLMENT_MODE, mode.to_db_str())])
    }

    /// Write settings before AppState reads them
    pub fn with_settings(settings: &[(&str, &str)]) -> Result<Self, String> {
        let (temp_file, db_path) =
            create_test_db().map_err(|e| format!("test database: {}", e))?;

        let conn = open_sqlite_connection(&db_path).map_err(|e| e.to_string())?;
        let conn = Arc::new(Mutex::new(conn));
        let config = Arc::new(ConfigManager::from_connection(conn.clone()));
        for (key, value) in settings {
            config.set_value(key, value).map_err(|e| e.to_string())?;
        }

        let state = AppState::new(db_path.clone())?;

        Ok(Self {
            db_path,
            state,
            catalog_repo: Arc::new(CatalogRepository::new(conn.clone())),
            section_repo: Arc::new(SectionRepository::new(conn.clone())),
            student_repo: Arc::new(StudentRepository::new(conn.clone())),
            action_log_repo: Arc::new(ActionLogRepository::new(conn)),
            config,
            _temp_file: temp_file,
        })
    }

    /// Seeded course by English name
    pub fn course(&self, name_en: &str) -> Course {
        self.catalog_repo
            .find_all_courses()
            .unwrap()
            .into_iter()
            .find(|c| c.name_en == name_en)
            .unwrap_or_else(|| panic!("course {} not seeded", name_en))
    }

    pub fn sections(&self, course_id: &str) -> Vec<Section> {
        self.section_repo.find_by_course(course_id).unwrap()
    }

    /// First section of a seeded course
    pub fn first_section(&self, course_name: &str) -> Section {
        let course = self.course(course_name);
        self.sections(&course.id).remove(0)
    }

    pub fn reload(&self, section_id: &str) -> Section {
        self.section_repo.find_by_id(section_id).unwrap().unwrap()
    }
}

/// Complete registration form
pub fn form(section_id: &str, university_id: &str) -> NewStudent {
    NewStudent {
        section_id: section_id.to_string(),
        name: format!("Student {}", university_id),
        university_id: university_id.to_string(),
        major: "Computer Science".to_string(),
        advisor: "Dr. Rami".to_string(),
    }
}
