// ==========================================
// HTU Schedule - domain layer
// ==========================================
// Entities, read models and value types.
// No data access, no workflow logic.
// ==========================================

pub mod action_log;
pub mod catalog;
pub mod report;
pub mod types;

pub use action_log::{ActionLog, ActionType};
pub use catalog::{Course, Department, NewStudent, Section, Student};
pub use report::{RegistrationDetail, StudentLookup, SummaryRow};
pub use types::{EnrollmentMode, Language, TextDirection, View};
