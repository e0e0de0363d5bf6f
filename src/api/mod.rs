// ==========================================
// HTU Schedule - API layer
// ==========================================
// Business API called by the Tauri commands:
// validation, error translation, localized messages, action log
// ==========================================

pub mod action_log_api;
pub mod catalog_api;
pub mod error;
pub mod registration_api;
pub mod section_admin_api;
pub mod student_api;
pub mod summary_api;

/// Actor recorded in action_log for operations started from the UI
pub const UI_ACTOR: &str = "ui";

pub use action_log_api::ActionLogApi;
pub use catalog_api::CatalogApi;
pub use error::{ApiError, ApiResult};
pub use registration_api::{RegistrationApi, RegistrationResponse, RegistrationStatus};
pub use section_admin_api::{AddSectionsResponse, RebuildSectionsResponse, SectionAdminApi};
pub use student_api::StudentApi;
pub use summary_api::{ExportResponse, SummaryApi};
