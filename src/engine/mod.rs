// ==========================================
// HTU Schedule - engine layer
// ==========================================
// Responsibility: workflows composed of repository calls
// Rule: engines build no SQL
// ==========================================

pub mod catalog_seeder;
pub mod enrollment;
pub mod section_lifecycle;
pub mod summary;

pub use catalog_seeder::{CatalogSeeder, SeedReport};
pub use enrollment::{EnrollmentEngine, EnrollmentError, EnrollmentOutcome, RollbackStatus};
pub use section_lifecycle::{RebuildReport, SectionLifecycleEngine, MAX_SECTIONS_PER_REQUEST};
pub use summary::{filter_rows, SummaryEngine};
