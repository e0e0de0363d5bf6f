// ==========================================
// HTU Schedule - audit trail API
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::action_log::ActionLog;
use crate::repository::action_log_repo::ActionLogRepository;
use std::sync::Arc;

pub const MAX_RECENT_ACTIONS: i32 = 500;

pub struct ActionLogApi {
    action_log_repo: Arc<ActionLogRepository>,
}

impl ActionLogApi {
    pub fn new(action_log_repo: Arc<ActionLogRepository>) -> Self {
        Self { action_log_repo }
    }

    /// Most recent actions first
    pub fn list_recent(&self, limit: i32) -> ApiResult<Vec<ActionLog>> {
        if limit <= 0 || limit > MAX_RECENT_ACTIONS {
            return Err(ApiError::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_RECENT_ACTIONS
            )));
        }
        Ok(self.action_log_repo.find_recent(limit)?)
    }

    /// Actions touching one course
    pub fn list_by_course(&self, course_id: &str) -> ApiResult<Vec<ActionLog>> {
        Ok(self.action_log_repo.find_by_course(course_id.trim())?)
    }
}
