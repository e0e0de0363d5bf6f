use crate::app::state::AppState;

use super::common::{map_api_error, parse_language, to_json};

// ==========================================
// Section administration commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn add_sections(
    state: tauri::State<'_, AppState>,
    course_id: String,
    count: i64,
) -> Result<String, String> {
    let result = state
        .section_admin_api
        .add_sections(&course_id, count)
        .map_err(map_api_error)?;
    to_json(&result)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_rebuild_warning(
    state: tauri::State<'_, AppState>,
    language: Option<String>,
) -> Result<String, String> {
    let lang = parse_language(language.as_deref())?;
    to_json(&state.section_admin_api.rebuild_warning(lang))
}

/// Destructive; the frontend passes `confirmed = true` after the warning
#[tauri::command(rename_all = "snake_case")]
pub async fn rebuild_sections(
    state: tauri::State<'_, AppState>,
    course_id: String,
    count: i64,
    confirmed: bool,
) -> Result<String, String> {
    let result = state
        .section_admin_api
        .rebuild_sections(&course_id, count, confirmed)
        .map_err(map_api_error)?;
    to_json(&result)
}
