// ==========================================
// HTU Schedule - summary engine
// ==========================================
// One SummaryRow per section, grouped in memory:
// departments by name_en -> courses in catalog order ->
// sections by number -> students in registration order
// ==========================================

use crate::domain::catalog::{Section, Student};
use crate::domain::report::SummaryRow;
use crate::perf::PerfGuard;
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::error::RepositoryResult;
use crate::repository::section_repo::SectionRepository;
use crate::repository::student_repo::StudentRepository;
use std::collections::HashMap;
use std::sync::Arc;

// ==========================================
// SummaryEngine
// ==========================================
pub struct SummaryEngine {
    catalog: Arc<CatalogRepository>,
    sections: Arc<SectionRepository>,
    students: Arc<StudentRepository>,
}

impl SummaryEngine {
    pub fn new(
        catalog: Arc<CatalogRepository>,
        sections: Arc<SectionRepository>,
        students: Arc<StudentRepository>,
    ) -> Self {
        Self {
            catalog,
            sections,
            students,
        }
    }

    /// Build the full summary report
    pub fn build_report(&self) -> RepositoryResult<Vec<SummaryRow>> {
        let _perf = PerfGuard::new("build_summary");

        let departments = self.catalog.find_all_departments()?;
        let courses = self.catalog.find_all_courses()?;
        let sections = self.sections.find_all()?;
        let students = self.students.find_all()?;

        let mut sections_by_course: HashMap<String, Vec<Section>> = HashMap::new();
        for s in sections {
            sections_by_course.entry(s.course_id.clone()).or_default().push(s);
        }
        for list in sections_by_course.values_mut() {
            list.sort_by_key(|s| s.section_number);
        }

        let mut students_by_section: HashMap<String, Vec<Student>> = HashMap::new();
        for st in students {
            students_by_section
                .entry(st.section_id.clone())
                .or_default()
                .push(st);
        }

        let mut rows = Vec::new();
        for dept in &departments {
            for course in courses.iter().filter(|c| c.dept_id == dept.id) {
                let Some(course_sections) = sections_by_course.remove(&course.id) else {
                    continue;
                };
                for section in course_sections {
                    let students = students_by_section.remove(&section.id).unwrap_or_default();
                    rows.push(SummaryRow {
                        section_id: section.id,
                        dept_id: dept.id.clone(),
                        dept_en: dept.name_en.clone(),
                        dept_ar: dept.name_ar.clone(),
                        course_id: course.id.clone(),
                        course_en: course.name_en.clone(),
                        course_ar: course.name_ar.clone(),
                        section: section.section_number,
                        capacity: section.capacity,
                        enrolled: section.enrolled,
                        students,
                    });
                }
            }
        }

        tracing::debug!(rows = rows.len(), "summary report built");
        Ok(rows)
    }
}

/// Rows whose course name contains `term` (case-insensitive, either locale)
pub fn filter_rows(rows: &[SummaryRow], term: &str) -> Vec<SummaryRow> {
    rows.iter()
        .filter(|r| r.matches_course(term))
        .cloned()
        .collect()
}
