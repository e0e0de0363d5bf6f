// ==========================================
// HTU Schedule - configuration manager
// ==========================================
// Responsibility: typed reads/writes of runtime settings
// Storage: config_kv table (key -> value)
// Absent or malformed values fall back to defaults
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::{EnrollmentMode, Language};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    /// Capacity of newly created sections
    pub const DEFAULT_SECTION_CAPACITY: &str = "section.default_capacity";
    /// READ_THEN_WRITE | CONDITIONAL
    pub const ENROLLMENT_MODE: &str = "enrollment.mode";
    /// Spreadsheet column width (characters)
    pub const EXPORT_COLUMN_WIDTH: &str = "export.column_width";
    pub const EXPORT_FILE_NAME: &str = "export.file_name";
    /// en | ar
    pub const DEFAULT_LANGUAGE: &str = "ui.default_language";
}

pub const DEFAULT_SECTION_CAPACITY: i64 = 20;
pub const DEFAULT_EXPORT_COLUMN_WIDTH: f64 = 25.0;
pub const DEFAULT_EXPORT_FILE_NAME: &str = "HTU_Schedule_Final.xlsx";

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Open a dedicated connection
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an existing connection
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Raw access
    // ==========================================

    /// Read a raw value (None when the key is absent)
    pub fn get_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Upsert a raw value
    pub fn set_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// All stored settings as a JSON object string
    pub fn snapshot(&self) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            map.insert(key, value);
        }

        serde_json::to_string(&json!(map))
            .map_err(|e| RepositoryError::InternalError(e.to_string()))
    }

    // ==========================================
    // Typed settings
    // ==========================================

    /// Capacity of new sections (default 20)
    pub fn default_section_capacity(&self) -> RepositoryResult<i64> {
        let Some(raw) = self.get_value(config_keys::DEFAULT_SECTION_CAPACITY)? else {
            return Ok(DEFAULT_SECTION_CAPACITY);
        };
        match raw.trim().parse::<i64>() {
            Ok(v) if v >= 0 => Ok(v),
            _ => {
                tracing::warn!(
                    config_key = config_keys::DEFAULT_SECTION_CAPACITY,
                    raw_value = %raw,
                    "malformed section capacity, using default"
                );
                Ok(DEFAULT_SECTION_CAPACITY)
            }
        }
    }

    pub fn enrollment_mode(&self) -> RepositoryResult<EnrollmentMode> {
        let Some(raw) = self.get_value(config_keys::ENROLLMENT_MODE)? else {
            return Ok(EnrollmentMode::default());
        };
        Ok(EnrollmentMode::from_str(&raw).unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::ENROLLMENT_MODE,
                raw_value = %raw,
                "unknown enrollment mode, using READ_THEN_WRITE"
            );
            EnrollmentMode::default()
        }))
    }

    pub fn export_column_width(&self) -> RepositoryResult<f64> {
        let Some(raw) = self.get_value(config_keys::EXPORT_COLUMN_WIDTH)? else {
            return Ok(DEFAULT_EXPORT_COLUMN_WIDTH);
        };
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
            _ => {
                tracing::warn!(
                    config_key = config_keys::EXPORT_COLUMN_WIDTH,
                    raw_value = %raw,
                    "malformed column width, using default"
                );
                Ok(DEFAULT_EXPORT_COLUMN_WIDTH)
            }
        }
    }

    pub fn export_file_name(&self) -> RepositoryResult<String> {
        let value = self
            .get_value(config_keys::EXPORT_FILE_NAME)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Ok(value.unwrap_or_else(|| DEFAULT_EXPORT_FILE_NAME.to_string()))
    }

    pub fn default_language(&self) -> RepositoryResult<Language> {
        let Some(raw) = self.get_value(config_keys::DEFAULT_LANGUAGE)? else {
            return Ok(Language::default());
        };
        Ok(Language::from_code(&raw).unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::DEFAULT_LANGUAGE,
                raw_value = %raw,
                "unknown language, using en"
            );
            Language::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_defaults_when_absent() {
        let config = setup();
        assert_eq!(config.default_section_capacity().unwrap(), 20);
        assert_eq!(config.enrollment_mode().unwrap(), EnrollmentMode::ReadThenWrite);
        assert_eq!(config.export_column_width().unwrap(), 25.0);
        assert_eq!(config.export_file_name().unwrap(), "HTU_Schedule_Final.xlsx");
        assert_eq!(config.default_language().unwrap(), Language::En);
    }

    #[test]
    fn test_set_value_overrides() {
        let config = setup();
        config
            .set_value(config_keys::DEFAULT_SECTION_CAPACITY, "30")
            .unwrap();
        config
            .set_value(config_keys::ENROLLMENT_MODE, "CONDITIONAL")
            .unwrap();
        config.set_value(config_keys::DEFAULT_LANGUAGE, "ar").unwrap();
        config.set_value(config_keys::DEFAULT_LANGUAGE, "ar-JO").unwrap();

        assert_eq!(config.default_section_capacity().unwrap(), 30);
        assert_eq!(config.enrollment_mode().unwrap(), EnrollmentMode::Conditional);
        assert_eq!(config.default_language().unwrap(), Language::Ar);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let config = setup();
        config
            .set_value(config_keys::DEFAULT_SECTION_CAPACITY, "twenty")
            .unwrap();
        config.set_value(config_keys::EXPORT_COLUMN_WIDTH, "-4").unwrap();
        config.set_value(config_keys::ENROLLMENT_MODE, "LOCKING").unwrap();
        config.set_value(config_keys::EXPORT_FILE_NAME, "   ").unwrap();

        assert_eq!(config.default_section_capacity().unwrap(), 20);
        assert_eq!(config.export_column_width().unwrap(), 25.0);
        assert_eq!(config.enrollment_mode().unwrap(), EnrollmentMode::ReadThenWrite);
        assert_eq!(config.export_file_name().unwrap(), "HTU_Schedule_Final.xlsx");
    }

    #[test]
    fn test_snapshot() {
        let config = setup();
        config.set_value(config_keys::EXPORT_COLUMN_WIDTH, "30").unwrap();
        config
            .set_value(config_keys::EXPORT_FILE_NAME, "schedule.xlsx")
            .unwrap();

        let snapshot: serde_json::Value =
            serde_json::from_str(&config.snapshot().unwrap()).unwrap();
        assert_eq!(snapshot["export.column_width"], "30");
        assert_eq!(snapshot["export.file_name"], "schedule.xlsx");
    }
}
