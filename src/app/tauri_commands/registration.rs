use crate::app::state::AppState;
use crate::domain::catalog::NewStudent;

use super::common::{map_api_error, to_json};

// ==========================================
// Registration commands
// ==========================================

/// Register a student; a FULL status means the UI should offer the override
#[tauri::command(rename_all = "snake_case")]
pub async fn register_student(
    state: tauri::State<'_, AppState>,
    section_id: String,
    name: String,
    university_id: String,
    major: String,
    advisor: String,
) -> Result<String, String> {
    let form = NewStudent {
        section_id,
        name,
        university_id,
        major,
        advisor,
    };
    let result = state
        .registration_api
        .register(&form)
        .await
        .map_err(map_api_error)?;
    to_json(&result)
}

/// Capacity +1, then the same registration once more
#[tauri::command(rename_all = "snake_case")]
pub async fn register_student_with_override(
    state: tauri::State<'_, AppState>,
    section_id: String,
    name: String,
    university_id: String,
    major: String,
    advisor: String,
) -> Result<String, String> {
    let form = NewStudent {
        section_id,
        name,
        university_id,
        major,
        advisor,
    };
    let result = state
        .registration_api
        .register_with_override(&form)
        .await
        .map_err(map_api_error)?;
    to_json(&result)
}
