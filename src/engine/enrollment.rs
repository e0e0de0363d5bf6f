// ==========================================
// HTU Schedule - enrollment engine
// ==========================================
// Input: a validated registration form
// Output: Registered | Full (override offered) | EnrollmentError
// ==========================================
// READ_THEN_WRITE: read section, compare, write enrolled+1, insert
//   student. The check and the write are separate store calls, so two
//   concurrent registrations can both pass the check (lost update).
// CONDITIONAL: guarded increment (enrolled < capacity) in one UPDATE.
// A failed student insert triggers a best-effort compensating write.
// ==========================================

use crate::domain::catalog::{NewStudent, Section, Student};
use crate::domain::types::EnrollmentMode;
use crate::repository::enrollment_store::EnrollmentStore;
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// ==========================================
// Outcomes and errors
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentOutcome {
    /// Seat taken and student record created
    Registered { student: Student, section: Section },
    /// No mutation happened; the caller may offer the capacity override
    Full { section: Section },
}

impl EnrollmentOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self, EnrollmentOutcome::Registered { .. })
    }
}

/// Result of the compensating write after a failed student insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RollbackStatus {
    Restored,
    Failed(String),
}

impl fmt::Display for RollbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollbackStatus::Restored => write!(f, "enrolled count restored"),
            RollbackStatus::Failed(reason) => write!(f, "rollback failed: {}", reason),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    #[error("section not found: {section_id}")]
    SectionNotFound { section_id: String },

    #[error("section {section_id} could not be read: {reason}")]
    SectionUnavailable { section_id: String, reason: String },

    #[error("enrolled count of section {section_id} could not be updated: {reason}")]
    IncrementFailed { section_id: String, reason: String },

    #[error("student insert into section {section_id} failed: {reason} ({rollback})")]
    StudentInsertFailed {
        section_id: String,
        reason: String,
        rollback: RollbackStatus,
    },

    #[error("capacity of section {section_id} could not be increased: {reason}")]
    CapacityIncreaseFailed { section_id: String, reason: String },

    #[error("registration into section {section_id} failed even after increasing capacity: {reason}")]
    OverrideReplayFailed { section_id: String, reason: String },
}

// ==========================================
// EnrollmentEngine
// ==========================================
pub struct EnrollmentEngine {
    store: Arc<dyn EnrollmentStore>,
    mode: EnrollmentMode,
}

impl EnrollmentEngine {
    pub fn new(store: Arc<dyn EnrollmentStore>, mode: EnrollmentMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> EnrollmentMode {
        self.mode
    }

    /// Register a student into a section
    ///
    /// # Arguments
    /// - `form`: trimmed, complete registration form
    ///
    /// # Returns
    /// - `Ok(Registered)`: enrolled +1, one student record created
    /// - `Ok(Full)`: section full, nothing written
    /// - `Err(...)`: read, increment or insert failed
    pub async fn register(&self, form: &NewStudent) -> Result<EnrollmentOutcome, EnrollmentError> {
        let section = self.load_section(&form.section_id).await?;

        match self.mode {
            EnrollmentMode::ReadThenWrite => self.register_read_then_write(form, section).await,
            EnrollmentMode::Conditional => self.register_conditional(form, section).await,
        }
    }

    /// Raise a section's capacity by one (read capacity, write capacity+1)
    pub async fn increase_capacity(&self, section_id: &str) -> Result<Section, EnrollmentError> {
        let mut section = match self.store.find_section(section_id).await {
            Ok(Some(s)) => s,
            Ok(None) => {
                return Err(EnrollmentError::SectionNotFound {
                    section_id: section_id.to_string(),
                })
            }
            Err(e) => {
                tracing::error!(section_id, error = %e, "capacity override: section read failed");
                return Err(EnrollmentError::CapacityIncreaseFailed {
                    section_id: section_id.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        let new_capacity = section.capacity + 1;
        if let Err(e) = self.store.set_capacity(section_id, new_capacity).await {
            tracing::error!(section_id, error = %e, "capacity override: write failed");
            return Err(EnrollmentError::CapacityIncreaseFailed {
                section_id: section_id.to_string(),
                reason: e.to_string(),
            });
        }

        tracing::info!(
            section_id,
            old_capacity = section.capacity,
            new_capacity,
            "section capacity increased"
        );
        section.capacity = new_capacity;
        Ok(section)
    }

    /// Capacity override: capacity+1, then replay the registration once
    ///
    /// Anything but `Registered` on the replay is `OverrideReplayFailed`
    pub async fn register_with_override(
        &self,
        form: &NewStudent,
    ) -> Result<EnrollmentOutcome, EnrollmentError> {
        self.increase_capacity(&form.section_id).await?;

        match self.register(form).await {
            Ok(outcome @ EnrollmentOutcome::Registered { .. }) => Ok(outcome),
            Ok(EnrollmentOutcome::Full { section }) => {
                tracing::error!(
                    section_id = %section.id,
                    capacity = section.capacity,
                    enrolled = section.enrolled,
                    "override replay found the section full again"
                );
                Err(EnrollmentError::OverrideReplayFailed {
                    section_id: section.id,
                    reason: "section still full after capacity increase".to_string(),
                })
            }
            Err(e) => {
                tracing::error!(section_id = %form.section_id, error = %e, "override replay failed");
                Err(EnrollmentError::OverrideReplayFailed {
                    section_id: form.section_id.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }

    // ==========================================
    // Internals
    // ==========================================

    async fn load_section(&self, section_id: &str) -> Result<Section, EnrollmentError> {
        match self.store.find_section(section_id).await {
            Ok(Some(section)) => Ok(section),
            Ok(None) => Err(EnrollmentError::SectionNotFound {
                section_id: section_id.to_string(),
            }),
            Err(e) => {
                tracing::error!(section_id, error = %e, "section read failed");
                Err(EnrollmentError::SectionUnavailable {
                    section_id: section_id.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn register_read_then_write(
        &self,
        form: &NewStudent,
        mut section: Section,
    ) -> Result<EnrollmentOutcome, EnrollmentError> {
        if section.is_full() {
            tracing::debug!(section_id = %section.id, "section full");
            return Ok(EnrollmentOutcome::Full { section });
        }

        let prior = section.enrolled;
        if let Err(e) = self.store.set_enrolled(&section.id, prior + 1).await {
            tracing::error!(section_id = %section.id, error = %e, "enrolled increment failed");
            return Err(EnrollmentError::IncrementFailed {
                section_id: section.id,
                reason: e.to_string(),
            });
        }

        let student = form.clone().into_student(Utc::now());
        if let Err(e) = self.store.insert_student(student.clone()).await {
            let rollback = match self.store.set_enrolled(&section.id, prior).await {
                Ok(()) => RollbackStatus::Restored,
                Err(re) => RollbackStatus::Failed(re.to_string()),
            };
            return Err(self.insert_failed(section.id, e.to_string(), rollback));
        }

        section.enrolled = prior + 1;
        tracing::info!(
            section_id = %section.id,
            university_id = %student.university_id,
            enrolled = section.enrolled,
            capacity = section.capacity,
            "student registered"
        );
        Ok(EnrollmentOutcome::Registered { student, section })
    }

    async fn register_conditional(
        &self,
        form: &NewStudent,
        section: Section,
    ) -> Result<EnrollmentOutcome, EnrollmentError> {
        match self.store.try_increment_enrolled(&section.id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(section_id = %section.id, "section full (guarded increment)");
                return Ok(EnrollmentOutcome::Full { section });
            }
            Err(e) => {
                tracing::error!(section_id = %section.id, error = %e, "guarded increment failed");
                return Err(EnrollmentError::IncrementFailed {
                    section_id: section.id,
                    reason: e.to_string(),
                });
            }
        }

        let student = form.clone().into_student(Utc::now());
        if let Err(e) = self.store.insert_student(student.clone()).await {
            let rollback = match self.store.decrement_enrolled(&section.id).await {
                Ok(true) => RollbackStatus::Restored,
                Ok(false) => RollbackStatus::Failed("enrolled count already zero".to_string()),
                Err(re) => RollbackStatus::Failed(re.to_string()),
            };
            return Err(self.insert_failed(section.id, e.to_string(), rollback));
        }

        // Other registrations may have landed in between: re-read for the reply
        let section = match self.store.find_section(&section.id).await {
            Ok(Some(fresh)) => fresh,
            _ => Section {
                enrolled: section.enrolled + 1,
                ..section
            },
        };
        tracing::info!(
            section_id = %section.id,
            university_id = %student.university_id,
            enrolled = section.enrolled,
            capacity = section.capacity,
            "student registered"
        );
        Ok(EnrollmentOutcome::Registered { student, section })
    }

    fn insert_failed(
        &self,
        section_id: String,
        reason: String,
        rollback: RollbackStatus,
    ) -> EnrollmentError {
        match &rollback {
            RollbackStatus::Restored => {
                tracing::warn!(section_id = %section_id, error = %reason, "student insert failed, enrolled count restored")
            }
            RollbackStatus::Failed(re) => {
                tracing::warn!(section_id = %section_id, error = %reason, rollback_error = %re, "student insert failed, rollback failed")
            }
        }
        EnrollmentError::StudentInsertFailed {
            section_id,
            reason,
            rollback,
        }
    }
}
