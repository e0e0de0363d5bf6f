use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// Student lookup
// ==========================================

/// `null` when no student has this university id
#[tauri::command(rename_all = "snake_case")]
pub async fn lookup_student(
    state: tauri::State<'_, AppState>,
    university_id: String,
) -> Result<String, String> {
    let result = state
        .student_api
        .lookup(&university_id)
        .map_err(map_api_error)?;
    to_json(&result)
}
