// ==========================================
// HTU Schedule - application state
// ==========================================
// Responsibility: open the database, bootstrap the schema,
// seed the catalog and wire repositories -> engines -> APIs.
// One shared Connection behind Arc<Mutex<..>>.
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{
    ActionLogApi, CatalogApi, RegistrationApi, SectionAdminApi, StudentApi, SummaryApi,
};
use crate::config::config_manager::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::engine::{
    CatalogSeeder, EnrollmentEngine, SectionLifecycleEngine, SeedReport, SummaryEngine,
};
use crate::i18n;
use crate::perf::{install_sqlite_tracing, SqlTracingSettings};
use crate::repository::{
    ActionLogRepository, CatalogRepository, SectionRepository, SqliteEnrollmentStore,
    StudentRepository,
};

/// Application state
///
/// Managed by Tauri as global state; also used directly by tests
pub struct AppState {
    pub db_path: String,

    pub catalog_api: Arc<CatalogApi>,
    pub registration_api: Arc<RegistrationApi>,
    pub student_api: Arc<StudentApi>,
    pub section_admin_api: Arc<SectionAdminApi>,
    pub summary_api: Arc<SummaryApi>,
    pub action_log_api: Arc<ActionLogApi>,

    pub config_manager: Arc<ConfigManager>,

    /// What the startup seeding did
    pub seed_report: SeedReport,
}

impl AppState {
    /// Build the application state
    ///
    /// # Arguments
    /// - `db_path`: SQLite file (created when missing)
    ///
    /// # Steps
    /// 1. open + PRAGMAs, schema bootstrap, SQL tracing
    /// 2. seed the catalog when the database is empty
    /// 3. wire repositories, engines and APIs
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "initializing AppState");

        let mut conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("cannot open database: {}", e))?;
        init_schema(&conn).map_err(|e| format!("schema bootstrap failed: {}", e))?;
        install_sqlite_tracing(&mut conn, SqlTracingSettings::from_env());
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // Repositories
        // ==========================================
        let catalog_repo = Arc::new(CatalogRepository::new(conn.clone()));
        let section_repo = Arc::new(SectionRepository::new(conn.clone()));
        let student_repo = Arc::new(StudentRepository::new(conn.clone()));
        let action_log_repo = Arc::new(ActionLogRepository::new(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn.clone()));

        // ==========================================
        // Settings
        // ==========================================
        let capacity = config_manager
            .default_section_capacity()
            .map_err(|e| format!("cannot read section capacity: {}", e))?;
        let mode = config_manager
            .enrollment_mode()
            .map_err(|e| format!("cannot read enrollment mode: {}", e))?;
        let language = config_manager
            .default_language()
            .map_err(|e| format!("cannot read default language: {}", e))?;
        i18n::set_language(language);

        // ==========================================
        // Seeding
        // ==========================================
        let seed_report = CatalogSeeder::new(catalog_repo.clone())
            .seed_if_empty(capacity)
            .map_err(|e| format!("catalog seeding failed: {}", e))?;

        // ==========================================
        // Engines
        // ==========================================
        let store = Arc::new(SqliteEnrollmentStore::new(
            section_repo.clone(),
            student_repo.clone(),
        ));
        let enrollment_engine = Arc::new(EnrollmentEngine::new(store, mode));
        let lifecycle_engine = Arc::new(SectionLifecycleEngine::new(
            section_repo.clone(),
            student_repo.clone(),
        ));
        let summary_engine = Arc::new(SummaryEngine::new(
            catalog_repo.clone(),
            section_repo.clone(),
            student_repo.clone(),
        ));

        // ==========================================
        // APIs
        // ==========================================
        let catalog_api = Arc::new(CatalogApi::new(catalog_repo.clone(), section_repo.clone()));
        let registration_api = Arc::new(RegistrationApi::new(
            enrollment_engine,
            action_log_repo.clone(),
        ));
        let student_api = Arc::new(StudentApi::new(
            student_repo,
            section_repo,
            catalog_repo.clone(),
        ));
        let section_admin_api = Arc::new(SectionAdminApi::new(
            catalog_repo,
            lifecycle_engine,
            config_manager.clone(),
            action_log_repo.clone(),
        ));
        let summary_api = Arc::new(SummaryApi::new(
            summary_engine,
            config_manager.clone(),
            action_log_repo.clone(),
        ));
        let action_log_api = Arc::new(ActionLogApi::new(action_log_repo));

        tracing::info!(
            mode = mode.to_db_str(),
            language = language.code(),
            seeded = !seed_report.skipped,
            "AppState ready"
        );

        Ok(Self {
            db_path,
            catalog_api,
            registration_api,
            student_api,
            section_admin_api,
            summary_api,
            action_log_api,
            config_manager,
            seed_report,
        })
    }
}

/// Default database path
///
/// 1. `HTU_SCHEDULE_DB_PATH` when set and non-blank
/// 2. `<data_dir>/htu-schedule[-dev]/htu_schedule.db`
/// 3. `./htu_schedule.db`
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("HTU_SCHEDULE_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./htu_schedule.db");

    if let Some(data_dir) = dirs::data_dir() {
        // Debug builds keep their own directory
        #[cfg(debug_assertions)]
        let dir = data_dir.join("htu-schedule-dev");

        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("htu-schedule");

        match std::fs::create_dir_all(&dir) {
            Ok(()) => path = dir.join("htu_schedule.db"),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "data dir unavailable, using ./htu_schedule.db")
            }
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_new_seeds_and_wires() {
        let _guard = crate::i18n::LOCALE_TEST_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("state.db").to_string_lossy().to_string();

        let state = AppState::new(db_path.clone()).unwrap();
        assert!(!state.seed_report.skipped);
        assert_eq!(state.catalog_api.list_departments().unwrap().len(), 4);

        // Second start finds the catalog already there
        drop(state);
        let again = AppState::new(db_path).unwrap();
        assert!(again.seed_report.skipped);
        assert_eq!(again.catalog_api.list_departments().unwrap().len(), 4);
    }
}
