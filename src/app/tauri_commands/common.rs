use crate::api::error::ApiError;
use crate::domain::types::Language;
use serde::{Deserialize, Serialize};

// ==========================================
// Shared helpers: error mapping, serialization, language parsing
// ==========================================

/// Error payload returned to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Stable error code of an ApiError
pub(super) fn error_code(err: &ApiError) -> &'static str {
    match err {
        ApiError::InvalidInput(_) => "INVALID_INPUT",
        ApiError::NotFound(_) => "NOT_FOUND",
        ApiError::RebuildNotConfirmed { .. } => "REBUILD_NOT_CONFIRMED",
        ApiError::RegistrationFailed(_) => "REGISTRATION_FAILED",
        ApiError::OverrideFailed(_) => "OVERRIDE_FAILED",
        ApiError::BusinessRuleViolation(_) => "BUSINESS_RULE_VIOLATION",
        ApiError::DatabaseError(_) => "DATABASE_ERROR",
        ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
        ApiError::DatabaseTransactionError(_) => "DATABASE_TRANSACTION_ERROR",
        ApiError::ExportError(_) => "EXPORT_ERROR",
        ApiError::InternalError(_) => "INTERNAL_ERROR",
        ApiError::Other(_) => "OTHER_ERROR",
    }
}

/// Convert an ApiError to the JSON string Tauri hands to the frontend
pub(super) fn map_api_error(err: ApiError) -> String {
    let error_response = ErrorResponse {
        code: error_code(&err).to_string(),
        message: err.to_string(),
        details: match &err {
            ApiError::RebuildNotConfirmed { course_id } => Some(serde_json::json!({
                "course_id": course_id,
                "warning": crate::i18n::t("sections.rebuild_warning"),
            })),
            _ => None,
        },
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| err.to_string())
}

pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("serialization failed: {}", e))
}

/// Parse an optional language code; None means the current UI language
pub(super) fn parse_language(code: Option<&str>) -> Result<Language, String> {
    match code {
        None => Ok(crate::i18n::current_language()),
        Some(c) => Language::from_code(c).ok_or_else(|| {
            map_api_error(ApiError::InvalidInput(format!("unsupported language: {}", c)))
        }),
    }
}
