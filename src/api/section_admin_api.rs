// ==========================================
// HTU Schedule - section administration API
// ==========================================
// add:     append sections with the configured default capacity
// rebuild: destructive; refused unless `confirmed` is true
// count:   above MAX_SECTIONS_PER_REQUEST is InvalidInput;
//          below 1 creates nothing and says so
// ==========================================

use crate::api::error::{require_non_blank, ApiError, ApiResult};
use crate::api::UI_ACTOR;
use crate::config::config_manager::ConfigManager;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::catalog::Section;
use crate::domain::types::Language;
use crate::engine::section_lifecycle::{
    RebuildReport, SectionLifecycleEngine, MAX_SECTIONS_PER_REQUEST,
};
use crate::i18n;
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::catalog_repo::CatalogRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSectionsResponse {
    pub course_id: String,
    pub sections: Vec<Section>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RebuildSectionsResponse {
    pub report: RebuildReport,
    pub message: String,
}

// ==========================================
// SectionAdminApi
// ==========================================
pub struct SectionAdminApi {
    catalog: Arc<CatalogRepository>,
    engine: Arc<SectionLifecycleEngine>,
    config: Arc<ConfigManager>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl SectionAdminApi {
    pub fn new(
        catalog: Arc<CatalogRepository>,
        engine: Arc<SectionLifecycleEngine>,
        config: Arc<ConfigManager>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            catalog,
            engine,
            config,
            action_log_repo,
        }
    }

    /// Append `count` sections to a course
    ///
    /// # Returns
    /// - `Ok(..)`: created sections (empty when count < 1)
    /// - `Err(InvalidInput)`: count above MAX_SECTIONS_PER_REQUEST
    /// - `Err(NotFound)`: unknown course
    pub fn add_sections(&self, course_id: &str, count: i64) -> ApiResult<AddSectionsResponse> {
        check_count(count)?;
        let course_id = self.ensure_course(course_id)?;
        let capacity = self.config.default_section_capacity()?;

        let sections = self.engine.add_sections(&course_id, count, capacity)?;
        if !sections.is_empty() {
            self.record(
                ActionLog::new(ActionType::AddSections, UI_ACTOR)
                    .with_course(&course_id)
                    .with_payload(serde_json::json!({
                        "count": sections.len(),
                        "first": sections.first().map(|s| s.section_number),
                        "last": sections.last().map(|s| s.section_number),
                        "capacity": capacity,
                    })),
            );
        }

        let message = if sections.is_empty() {
            i18n::t("sections.none_added")
        } else {
            i18n::t("sections.added")
        };
        Ok(AddSectionsResponse {
            course_id,
            sections,
            message,
        })
    }

    /// Delete every section (and student) of a course, then create 1..count
    ///
    /// # Returns
    /// - `Err(RebuildNotConfirmed)`: `confirmed` was false; nothing read or written
    /// - `Err(InvalidInput)`: count above MAX_SECTIONS_PER_REQUEST
    /// - `Err(NotFound)`: unknown course
    pub fn rebuild_sections(
        &self,
        course_id: &str,
        count: i64,
        confirmed: bool,
    ) -> ApiResult<RebuildSectionsResponse> {
        if !confirmed {
            tracing::warn!(course_id, "rebuild refused: not confirmed");
            return Err(ApiError::RebuildNotConfirmed {
                course_id: course_id.trim().to_string(),
            });
        }
        check_count(count)?;

        let course_id = self.ensure_course(course_id)?;
        let capacity = self.config.default_section_capacity()?;

        let report = self
            .engine
            .rebuild_sections(&course_id, count, capacity)
            .map_err(|e| {
                tracing::error!(course_id = %course_id, error = %e, "rebuild sections failed");
                ApiError::from(e)
            })?;

        if !report.sections.is_empty() {
            self.record(
                ActionLog::new(ActionType::RebuildSections, UI_ACTOR)
                    .with_course(&course_id)
                    .with_payload(serde_json::json!({
                        "removed_sections": report.removed_sections,
                        "removed_students": report.removed_students,
                        "created": report.sections.len(),
                        "capacity": capacity,
                    })),
            );
        }

        // count < 1 leaves the course as it was
        let message = if report.sections.is_empty() {
            i18n::t("sections.rebuild_failed")
        } else {
            i18n::t("sections.rebuilt")
        };
        Ok(RebuildSectionsResponse { report, message })
    }

    /// Warning shown before a rebuild
    pub fn rebuild_warning(&self, lang: Language) -> String {
        i18n::t_for(lang, "sections.rebuild_warning")
    }

    fn ensure_course(&self, course_id: &str) -> ApiResult<String> {
        require_non_blank("course_id", course_id)?;
        let course_id = course_id.trim();
        match self.catalog.find_course(course_id)? {
            Some(course) => Ok(course.id),
            None => Err(ApiError::NotFound(format!("Course (id={})", course_id))),
        }
    }

    fn record(&self, log: ActionLog) {
        if let Err(e) = self.action_log_repo.insert(&log) {
            tracing::warn!(action_type = %log.action_type, error = %e, "action log write failed");
        }
    }
}

fn check_count(count: i64) -> ApiResult<()> {
    if count > MAX_SECTIONS_PER_REQUEST {
        return Err(ApiError::InvalidInput(format!(
            "count must be at most {} (got {})",
            MAX_SECTIONS_PER_REQUEST, count
        )));
    }
    Ok(())
}
