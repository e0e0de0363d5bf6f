use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// Catalog browsing commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn list_departments(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let result = state.catalog_api.list_departments().map_err(map_api_error)?;
    to_json(&result)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn list_courses(
    state: tauri::State<'_, AppState>,
    dept_id: String,
) -> Result<String, String> {
    let result = state
        .catalog_api
        .list_courses(&dept_id)
        .map_err(map_api_error)?;
    to_json(&result)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn list_sections(
    state: tauri::State<'_, AppState>,
    course_id: String,
) -> Result<String, String> {
    let result = state
        .catalog_api
        .list_sections(&course_id)
        .map_err(map_api_error)?;
    to_json(&result)
}
