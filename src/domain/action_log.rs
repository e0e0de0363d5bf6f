// ==========================================
// HTU Schedule - action log domain model
// ==========================================
// Every mutating operation leaves an audit entry
// Aligned with the action_log table
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// ActionLog
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,
    pub action_type: String,      // stored as ActionType::as_str()
    pub action_ts: DateTime<Utc>,
    pub actor: String,

    // ===== scope =====
    pub course_id: Option<String>,
    pub section_id: Option<String>,

    // ===== payload =====
    pub payload_json: Option<JsonValue>,
    pub detail: Option<String>,
}

// ==========================================
// ActionType
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    RegisterStudent,  // student registered
    CapacityOverride, // capacity raised by one for a full section
    AddSections,      // sections appended
    RebuildSections,  // sections deleted and recreated
    SeedCatalog,      // catalog seeded into an empty store
    ExportWorkbook,   // xlsx export
    ExportCsv,        // csv export
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::RegisterStudent => "REGISTER_STUDENT",
            ActionType::CapacityOverride => "CAPACITY_OVERRIDE",
            ActionType::AddSections => "ADD_SECTIONS",
            ActionType::RebuildSections => "REBUILD_SECTIONS",
            ActionType::SeedCatalog => "SEED_CATALOG",
            ActionType::ExportWorkbook => "EXPORT_WORKBOOK",
            ActionType::ExportCsv => "EXPORT_CSV",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "REGISTER_STUDENT" => Some(ActionType::RegisterStudent),
            "CAPACITY_OVERRIDE" => Some(ActionType::CapacityOverride),
            "ADD_SECTIONS" => Some(ActionType::AddSections),
            "REBUILD_SECTIONS" => Some(ActionType::RebuildSections),
            "SEED_CATALOG" => Some(ActionType::SeedCatalog),
            "EXPORT_WORKBOOK" => Some(ActionType::ExportWorkbook),
            "EXPORT_CSV" => Some(ActionType::ExportCsv),
            _ => None,
        }
    }
}

impl ActionLog {
    /// New entry stamped now with a fresh id
    pub fn new(action_type: ActionType, actor: &str) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            action_type: action_type.as_str().to_string(),
            action_ts: Utc::now(),
            actor: actor.to_string(),
            course_id: None,
            section_id: None,
            payload_json: None,
            detail: None,
        }
    }

    pub fn with_course(mut self, course_id: &str) -> Self {
        self.course_id = Some(course_id.to_string());
        self
    }

    pub fn with_section(mut self, section_id: &str) -> Self {
        self.section_id = Some(section_id.to_string());
        self
    }

    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.payload_json = Some(payload);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_round_trip() {
        for t in [
            ActionType::RegisterStudent,
            ActionType::CapacityOverride,
            ActionType::AddSections,
            ActionType::RebuildSections,
            ActionType::SeedCatalog,
            ActionType::ExportWorkbook,
            ActionType::ExportCsv,
        ] {
            assert_eq!(ActionType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(ActionType::from_str("Import"), None);
    }

    #[test]
    fn test_builder() {
        let log = ActionLog::new(ActionType::AddSections, "admin")
            .with_course("C1")
            .with_payload(serde_json::json!({ "count": 2 }))
            .with_detail("added 2 sections");
        assert_eq!(log.action_type, "ADD_SECTIONS");
        assert_eq!(log.course_id.as_deref(), Some("C1"));
        assert!(log.section_id.is_none());
        assert_eq!(log.payload_json.unwrap()["count"], 2);
    }
}
