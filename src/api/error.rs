// ==========================================
// HTU Schedule - API error type
// ==========================================
// Translates repository / enrollment / export errors into
// user-facing errors. Every variant carries its reason.
// ==========================================

use crate::engine::enrollment::EnrollmentError;
use crate::exporter::error::ExportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API layer error
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Business errors
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rebuild of course {course_id} requires explicit confirmation")]
    RebuildNotConfirmed { course_id: String },

    #[error("registration failed: {0}")]
    RegistrationFailed(String),

    /// Capacity was raised (or raising failed) and the replay did not register
    #[error("override failed: {0}")]
    OverrideFailed(String),

    #[error("business rule violated: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // Data access errors
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // Export errors
    // ==========================================
    #[error("export failed: {0}")]
    ExportError(String),

    // ==========================================
    // General
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// From RepositoryError
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={})", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("could not acquire database lock: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("unique constraint: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("foreign key constraint: {}", msg))
            }
            RepositoryError::CheckConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("check constraint: {}", msg))
            }
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("field {}: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// From EnrollmentError
// ==========================================
impl From<EnrollmentError> for ApiError {
    fn from(err: EnrollmentError) -> Self {
        match err {
            EnrollmentError::SectionNotFound { section_id } => {
                ApiError::NotFound(format!("Section (id={})", section_id))
            }
            e @ (EnrollmentError::CapacityIncreaseFailed { .. }
            | EnrollmentError::OverrideReplayFailed { .. }) => {
                ApiError::OverrideFailed(e.to_string())
            }
            e => ApiError::RegistrationFailed(e.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NothingToExport => {
                ApiError::BusinessRuleViolation(ExportError::NothingToExport.to_string())
            }
            other => ApiError::ExportError(other.to_string()),
        }
    }
}

/// Result alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Reject blank values
pub fn require_non_blank(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::enrollment::RollbackStatus;

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::NotFound {
            entity: "Course".to_string(),
            id: "C1".to_string(),
        }
        .into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Course"));
                assert!(msg.contains("C1"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }

        let api_err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(api_err, ApiError::DatabaseConnectionError(_)));

        let api_err: ApiError =
            RepositoryError::ForeignKeyViolation("FOREIGN KEY constraint failed".to_string()).into();
        assert!(matches!(api_err, ApiError::BusinessRuleViolation(_)));
    }

    #[test]
    fn test_enrollment_error_conversion() {
        let api_err: ApiError = EnrollmentError::StudentInsertFailed {
            section_id: "S1".to_string(),
            reason: "disk full".to_string(),
            rollback: RollbackStatus::Restored,
        }
        .into();
        match api_err {
            ApiError::RegistrationFailed(msg) => {
                assert!(msg.contains("disk full"));
                assert!(msg.contains("restored"));
            }
            other => panic!("expected RegistrationFailed, got {:?}", other),
        }

        let api_err: ApiError = EnrollmentError::OverrideReplayFailed {
            section_id: "S1".to_string(),
            reason: "still full".to_string(),
        }
        .into();
        assert!(matches!(api_err, ApiError::OverrideFailed(_)));

        let api_err: ApiError = EnrollmentError::SectionNotFound {
            section_id: "S9".to_string(),
        }
        .into();
        assert!(matches!(api_err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_export_error_conversion() {
        let api_err: ApiError = ExportError::NothingToExport.into();
        assert!(matches!(api_err, ApiError::BusinessRuleViolation(_)));
    }

    #[test]
    fn test_require_non_blank() {
        assert!(require_non_blank("name", "Lina").is_ok());
        assert!(matches!(
            require_non_blank("name", "   "),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
