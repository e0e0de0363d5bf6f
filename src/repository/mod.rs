// ==========================================
// HTU Schedule - data access layer
// ==========================================
// Rule: repositories hold no business logic
// Rule: every query is parameterized
// ==========================================

pub mod action_log_repo;
pub mod catalog_repo;
pub mod enrollment_store;
pub mod error;
pub mod section_repo;
pub mod student_repo;

pub use action_log_repo::ActionLogRepository;
pub use catalog_repo::{CatalogBatch, CatalogRepository};
pub use enrollment_store::{EnrollmentStore, SqliteEnrollmentStore};
pub use error::{RepositoryError, RepositoryResult};
pub use section_repo::SectionRepository;
pub use student_repo::StudentRepository;
