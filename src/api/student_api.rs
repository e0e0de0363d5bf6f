// ==========================================
// HTU Schedule - student lookup API
// ==========================================
// Every registration sharing a university id.
// Identity comes from the earliest record; each registration keeps
// its own timestamp. Unresolvable section/course -> "Unknown" / 0.
// ==========================================

use crate::api::error::{require_non_blank, ApiResult};
use crate::domain::catalog::{Course, Section, Student};
use crate::domain::report::{RegistrationDetail, StudentLookup};
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::section_repo::SectionRepository;
use crate::repository::student_repo::StudentRepository;
use std::sync::Arc;

const UNKNOWN_COURSE: &str = "Unknown";

pub struct StudentApi {
    students: Arc<StudentRepository>,
    sections: Arc<SectionRepository>,
    catalog: Arc<CatalogRepository>,
}

impl StudentApi {
    pub fn new(
        students: Arc<StudentRepository>,
        sections: Arc<SectionRepository>,
        catalog: Arc<CatalogRepository>,
    ) -> Self {
        Self {
            students,
            sections,
            catalog,
        }
    }

    /// Look a student up by university id
    ///
    /// # Returns
    /// - `Ok(Some(..))`: identity and every registration
    /// - `Ok(None)`: no record (empty state)
    /// - `Err(InvalidInput)`: blank id
    pub fn lookup(&self, university_id: &str) -> ApiResult<Option<StudentLookup>> {
        require_non_blank("university_id", university_id)?;
        let university_id = university_id.trim();

        let records = self.students.find_by_university_id(university_id)?;
        let Some(base) = records.first().cloned() else {
            tracing::debug!(university_id, "student lookup: no match");
            return Ok(None);
        };

        let registrations = records.iter().map(|r| self.describe(r)).collect();
        Ok(Some(StudentLookup {
            student: base,
            registrations,
        }))
    }

    fn describe(&self, record: &Student) -> RegistrationDetail {
        let section = self.resolve_section(&record.section_id);
        let course = section
            .as_ref()
            .and_then(|s| self.resolve_course(&s.course_id));

        RegistrationDetail {
            student_id: record.id.clone(),
            section_id: record.section_id.clone(),
            course_en: course
                .as_ref()
                .map(|c| c.name_en.clone())
                .unwrap_or_else(|| UNKNOWN_COURSE.to_string()),
            course_ar: course
                .as_ref()
                .map(|c| c.name_ar.clone())
                .unwrap_or_else(|| UNKNOWN_COURSE.to_string()),
            section_number: section.map(|s| s.section_number).unwrap_or(0),
            registered_at: record.created_at,
        }
    }

    fn resolve_section(&self, section_id: &str) -> Option<Section> {
        self.sections.find_by_id(section_id).unwrap_or_else(|e| {
            tracing::warn!(section_id, error = %e, "lookup: section read failed");
            None
        })
    }

    fn resolve_course(&self, course_id: &str) -> Option<Course> {
        self.catalog.find_course(course_id).unwrap_or_else(|e| {
            tracing::warn!(course_id, error = %e, "lookup: course read failed");
            None
        })
    }
}
