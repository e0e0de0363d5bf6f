// ==========================================
// HTU Schedule - registration API
// ==========================================
// Validates the form, runs the enrollment workflow,
// localizes the outcome and records it in action_log.
// Full is a normal response: the UI offers the override.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::UI_ACTOR;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::catalog::{NewStudent, Section, Student};
use crate::engine::enrollment::{EnrollmentEngine, EnrollmentError, EnrollmentOutcome};
use crate::i18n;
use crate::repository::action_log_repo::ActionLogRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Registered,
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub status: RegistrationStatus,
    /// Localized message for the alert / confirm dialog
    pub message: String,
    pub section: Section,
    pub student: Option<Student>,
}

impl RegistrationResponse {
    fn from_outcome(outcome: EnrollmentOutcome) -> Self {
        match outcome {
            EnrollmentOutcome::Registered { student, section } => Self {
                status: RegistrationStatus::Registered,
                message: i18n::t("registration.success"),
                section,
                student: Some(student),
            },
            EnrollmentOutcome::Full { section } => Self {
                status: RegistrationStatus::Full,
                message: i18n::t("registration.full"),
                section,
                student: None,
            },
        }
    }
}

// ==========================================
// RegistrationApi
// ==========================================
pub struct RegistrationApi {
    engine: Arc<EnrollmentEngine>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl RegistrationApi {
    pub fn new(engine: Arc<EnrollmentEngine>, action_log_repo: Arc<ActionLogRepository>) -> Self {
        Self {
            engine,
            action_log_repo,
        }
    }

    /// Register a student
    ///
    /// # Returns
    /// - `Registered`: seat taken
    /// - `Full`: nothing written; call `register_with_override` to proceed
    /// - `Err(InvalidInput)`: a required field is blank
    /// - `Err(RegistrationFailed)`: store failure (logged)
    pub async fn register(&self, form: &NewStudent) -> ApiResult<RegistrationResponse> {
        let form = validate(form)?;
        let outcome = self.engine.register(&form).await?;

        if let EnrollmentOutcome::Registered { student, section } = &outcome {
            self.record(
                ActionLog::new(ActionType::RegisterStudent, UI_ACTOR)
                    .with_course(&section.course_id)
                    .with_section(&section.id)
                    .with_payload(serde_json::json!({
                        "student_id": student.id,
                        "university_id": student.university_id,
                        "enrolled": section.enrolled,
                        "capacity": section.capacity,
                        "mode": self.engine.mode().to_db_str(),
                    })),
            );
        }
        Ok(RegistrationResponse::from_outcome(outcome))
    }

    /// Raise the section capacity by one and replay the registration once
    ///
    /// A replay that does not register is `Err(OverrideFailed)`
    pub async fn register_with_override(
        &self,
        form: &NewStudent,
    ) -> ApiResult<RegistrationResponse> {
        let form = validate(form)?;
        let outcome = self
            .engine
            .register_with_override(&form)
            .await
            .map_err(|e| {
                tracing::error!(section_id = %form.section_id, error = %e, "capacity override failed");
                match e {
                    EnrollmentError::SectionNotFound { .. } => ApiError::from(e),
                    other => ApiError::OverrideFailed(format!(
                        "{} ({})",
                        i18n::t("registration.override_failed"),
                        other
                    )),
                }
            })?;

        if let EnrollmentOutcome::Registered { student, section } = &outcome {
            self.record(
                ActionLog::new(ActionType::CapacityOverride, UI_ACTOR)
                    .with_course(&section.course_id)
                    .with_section(&section.id)
                    .with_payload(serde_json::json!({
                        "student_id": student.id,
                        "university_id": student.university_id,
                        "new_capacity": section.capacity,
                        "enrolled": section.enrolled,
                    }))
                    .with_detail(format!("capacity raised to {}", section.capacity)),
            );
        }
        Ok(RegistrationResponse::from_outcome(outcome))
    }

    /// Best-effort audit write
    fn record(&self, log: ActionLog) {
        if let Err(e) = self.action_log_repo.insert(&log) {
            tracing::warn!(action_type = %log.action_type, error = %e, "action log write failed");
        }
    }
}

/// Trim every field and reject blanks before any store call
fn validate(form: &NewStudent) -> ApiResult<NewStudent> {
    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::InvalidInput(format!(
            "required fields are empty: {}",
            missing.join(", ")
        )));
    }
    Ok(form.trimmed())
}
