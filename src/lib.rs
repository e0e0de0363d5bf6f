// ==========================================
// HTU Schedule - core library
// ==========================================
// Course registration and section management for HTU:
// catalog, enrollment with capacity override, section lifecycle,
// summary report and spreadsheet export.
// Stack: Tauri + Rust + SQLite
// ==========================================

// Locale tables (locales/en.yml, locales/ar.yml)
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// Modules
// ==========================================

// Domain entities and value types
pub mod domain;

// Data access
pub mod repository;

// Workflows
pub mod engine;

// Spreadsheet / CSV export
pub mod exporter;

// Settings and the static catalog
pub mod config;

// Connection setup and schema bootstrap
pub mod db;

pub mod logging;

pub mod i18n;

// SQL counting / slow statement logging
pub mod perf;

// Business API called by the Tauri commands
pub mod api;

// AppState and Tauri integration
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    ActionLog, ActionType, Course, Department, EnrollmentMode, Language, NewStudent,
    RegistrationDetail, Section, Student, StudentLookup, SummaryRow, TextDirection, View,
};

pub use engine::{
    CatalogSeeder, EnrollmentEngine, EnrollmentError, EnrollmentOutcome, RebuildReport,
    RollbackStatus, SectionLifecycleEngine, SeedReport, SummaryEngine,
};

pub use api::{
    ActionLogApi, ApiError, ApiResult, CatalogApi, RegistrationApi, SectionAdminApi, StudentApi,
    SummaryApi,
};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "HTU Schedule";
