use crate::app::state::AppState;
use crate::domain::types::{Language, TextDirection};
use crate::i18n;

use super::common::{parse_language, to_json};

// ==========================================
// Language toggle
// ==========================================

#[derive(serde::Serialize)]
struct LanguageInfo {
    language: Language,
    direction: TextDirection,
    navigation: Vec<i18n::NavItem>,
}

fn current_info() -> LanguageInfo {
    let lang = i18n::current_language();
    LanguageInfo {
        language: lang,
        direction: lang.direction(),
        navigation: i18n::navigation(lang),
    }
}

/// Switch the display language; the frontend flips `dir` from the result
#[tauri::command(rename_all = "snake_case")]
pub async fn set_language(
    _state: tauri::State<'_, AppState>,
    language: String,
) -> Result<String, String> {
    let lang = parse_language(Some(&language))?;
    i18n::set_language(lang);
    tracing::info!(language = lang.code(), "display language changed");
    to_json(&current_info())
}

#[tauri::command(rename_all = "snake_case")]
pub async fn get_language(_state: tauri::State<'_, AppState>) -> Result<String, String> {
    to_json(&current_info())
}
