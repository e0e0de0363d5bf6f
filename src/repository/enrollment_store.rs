// ==========================================
// HTU Schedule - EnrollmentStore trait
// ==========================================
// The store calls the enrollment workflow is composed of.
// Each call is atomic on its own; the sequence is not.
// Implementor: SqliteEnrollmentStore (rusqlite on the blocking pool)
// ==========================================

use crate::domain::catalog::{Section, Student};
use crate::perf::PerfGuard;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::section_repo::SectionRepository;
use crate::repository::student_repo::StudentRepository;
use async_trait::async_trait;
use std::sync::Arc;

// ==========================================
// EnrollmentStore Trait
// ==========================================
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Read one section (None when it does not exist)
    async fn find_section(&self, section_id: &str) -> RepositoryResult<Option<Section>>;

    /// Overwrite the enrolled counter (read-then-write path and its rollback)
    async fn set_enrolled(&self, section_id: &str, enrolled: i64) -> RepositoryResult<()>;

    /// Guarded increment; false when no seat is free
    async fn try_increment_enrolled(&self, section_id: &str) -> RepositoryResult<bool>;

    /// Guarded decrement; false when already zero
    async fn decrement_enrolled(&self, section_id: &str) -> RepositoryResult<bool>;

    /// Overwrite the capacity
    async fn set_capacity(&self, section_id: &str, capacity: i64) -> RepositoryResult<()>;

    /// Insert the student record
    async fn insert_student(&self, student: Student) -> RepositoryResult<String>;
}

// ==========================================
// SqliteEnrollmentStore
// ==========================================
pub struct SqliteEnrollmentStore {
    sections: Arc<SectionRepository>,
    students: Arc<StudentRepository>,
}

impl SqliteEnrollmentStore {
    pub fn new(sections: Arc<SectionRepository>, students: Arc<StudentRepository>) -> Self {
        Self { sections, students }
    }
}

/// Run a blocking repository call on tokio's blocking pool, timed as `op`
async fn run_blocking<T, F>(op: &'static str, f: F) -> RepositoryResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RepositoryResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let _perf = PerfGuard::new(op);
        f()
    })
    .await
    .map_err(|e| RepositoryError::InternalError(format!("blocking task failed: {}", e)))?
}

#[async_trait]
impl EnrollmentStore for SqliteEnrollmentStore {
    async fn find_section(&self, section_id: &str) -> RepositoryResult<Option<Section>> {
        let repo = self.sections.clone();
        let id = section_id.to_string();
        run_blocking("enrollment.find_section", move || repo.find_by_id(&id)).await
    }

    async fn set_enrolled(&self, section_id: &str, enrolled: i64) -> RepositoryResult<()> {
        let repo = self.sections.clone();
        let id = section_id.to_string();
        run_blocking("enrollment.set_enrolled", move || repo.update_enrolled(&id, enrolled)).await
    }

    async fn try_increment_enrolled(&self, section_id: &str) -> RepositoryResult<bool> {
        let repo = self.sections.clone();
        let id = section_id.to_string();
        run_blocking("enrollment.try_increment_enrolled", move || repo.try_increment_enrolled(&id)).await
    }

    async fn decrement_enrolled(&self, section_id: &str) -> RepositoryResult<bool> {
        let repo = self.sections.clone();
        let id = section_id.to_string();
        run_blocking("enrollment.decrement_enrolled", move || repo.decrement_enrolled(&id)).await
    }

    async fn set_capacity(&self, section_id: &str, capacity: i64) -> RepositoryResult<()> {
        let repo = self.sections.clone();
        let id = section_id.to_string();
        run_blocking("enrollment.set_capacity", move || repo.update_capacity(&id, capacity)).await
    }

    async fn insert_student(&self, student: Student) -> RepositoryResult<String> {
        let repo = self.students.clone();
        run_blocking("enrollment.insert_student", move || repo.insert(&student)).await
    }
}
