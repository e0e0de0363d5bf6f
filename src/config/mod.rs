// ==========================================
// HTU Schedule - configuration layer
// ==========================================
// Runtime settings (config_kv table) and the static initial catalog
// ==========================================

pub mod config_manager;
pub mod seed_catalog;

pub use config_manager::{config_keys, ConfigManager};
pub use seed_catalog::{SeedCourse, SeedDepartment, INITIAL_CATALOG};
