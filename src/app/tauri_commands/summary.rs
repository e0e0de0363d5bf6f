use std::path::PathBuf;

use crate::app::state::AppState;

use super::common::{map_api_error, parse_language, to_json};

// ==========================================
// Summary, export and audit commands
// ==========================================

#[tauri::command(rename_all = "snake_case")]
pub async fn get_summary(
    state: tauri::State<'_, AppState>,
    search_term: Option<String>,
) -> Result<String, String> {
    let result = state
        .summary_api
        .get_summary(search_term.as_deref())
        .map_err(map_api_error)?;
    to_json(&result)
}

/// Without `path` the workbook goes to the download directory
#[tauri::command(rename_all = "snake_case")]
pub async fn export_summary_workbook(
    state: tauri::State<'_, AppState>,
    path: Option<String>,
    language: Option<String>,
) -> Result<String, String> {
    let lang = parse_language(language.as_deref())?;
    let target = match path {
        Some(p) => PathBuf::from(p),
        None => state
            .summary_api
            .default_export_path(&default_export_dir())
            .map_err(map_api_error)?,
    };

    let result = state
        .summary_api
        .export_workbook(&target, lang)
        .map_err(map_api_error)?;
    to_json(&result)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn export_summary_csv(
    state: tauri::State<'_, AppState>,
    path: String,
) -> Result<String, String> {
    let result = state
        .summary_api
        .export_csv(&PathBuf::from(path))
        .map_err(map_api_error)?;
    to_json(&result)
}

#[tauri::command(rename_all = "snake_case")]
pub async fn list_recent_actions(
    state: tauri::State<'_, AppState>,
    limit: Option<i32>,
) -> Result<String, String> {
    let result = state
        .action_log_api
        .list_recent(limit.unwrap_or(50))
        .map_err(map_api_error)?;
    to_json(&result)
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
