// ==========================================
// HTU Schedule - summary & export API
// ==========================================
// get_summary:     report rows, optionally filtered by course name
// export_workbook: one sheet per department (rust_xlsxwriter)
// export_csv:      flat summary table
// ==========================================

use crate::api::error::ApiResult;
use crate::api::UI_ACTOR;
use crate::config::config_manager::ConfigManager;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::report::SummaryRow;
use crate::domain::types::Language;
use crate::engine::summary::{filter_rows, SummaryEngine};
use crate::exporter::{workbook_layout, write_summary_csv_file, write_workbook};
use crate::i18n;
use crate::repository::action_log_repo::ActionLogRepository;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub path: String,
    /// Sheets (xlsx) or records (csv) written
    pub written: usize,
    pub message: String,
}

// ==========================================
// SummaryApi
// ==========================================
pub struct SummaryApi {
    engine: Arc<SummaryEngine>,
    config: Arc<ConfigManager>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl SummaryApi {
    pub fn new(
        engine: Arc<SummaryEngine>,
        config: Arc<ConfigManager>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            engine,
            config,
            action_log_repo,
        }
    }

    /// Summary rows; `term` filters by course name in either language
    pub fn get_summary(&self, term: Option<&str>) -> ApiResult<Vec<SummaryRow>> {
        let rows = self.engine.build_report()?;
        Ok(match term {
            Some(t) if !t.trim().is_empty() => filter_rows(&rows, t),
            _ => rows,
        })
    }

    /// Configured export file name inside `dir`
    pub fn default_export_path(&self, dir: &Path) -> ApiResult<PathBuf> {
        Ok(dir.join(self.config.export_file_name()?))
    }

    /// Write the spreadsheet export to `path`
    ///
    /// # Arguments
    /// - `lang`: titles, headers, sheet names and sheet direction
    pub fn export_workbook(&self, path: &Path, lang: Language) -> ApiResult<ExportResponse> {
        let rows = self.engine.build_report()?;
        let column_width = self.config.export_column_width()?;
        let sheets = workbook_layout(&rows, lang, column_width);

        let written = write_workbook(&sheets, path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "workbook export failed");
            e
        })?;

        self.record(
            ActionLog::new(ActionType::ExportWorkbook, UI_ACTOR).with_payload(serde_json::json!({
                "path": path.display().to_string(),
                "sheets": written,
                "language": lang.code(),
            })),
        );
        Ok(self.response(path, written, lang))
    }

    /// Write the flat CSV export to `path`
    pub fn export_csv(&self, path: &Path) -> ApiResult<ExportResponse> {
        let rows = self.engine.build_report()?;
        let written = write_summary_csv_file(&rows, path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "csv export failed");
            e
        })?;

        self.record(
            ActionLog::new(ActionType::ExportCsv, UI_ACTOR).with_payload(serde_json::json!({
                "path": path.display().to_string(),
                "records": written,
            })),
        );
        Ok(self.response(path, written, i18n::current_language()))
    }

    fn response(&self, path: &Path, written: usize, lang: Language) -> ExportResponse {
        let path = path.display().to_string();
        ExportResponse {
            message: i18n::t_for_with_args(lang, "summary.exported", &[("path", path.as_str())]),
            path,
            written,
        }
    }

    fn record(&self, log: ActionLog) {
        if let Err(e) = self.action_log_repo.insert(&log) {
            tracing::warn!(action_type = %log.action_type, error = %e, "action log write failed");
        }
    }
}
