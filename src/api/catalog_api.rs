// ==========================================
// HTU Schedule - catalog browsing API
// ==========================================
// Feeds the dependent selects of every form:
// department -> course -> section
// ==========================================

use crate::api::error::{require_non_blank, ApiResult};
use crate::domain::catalog::{Course, Department, Section};
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::section_repo::SectionRepository;
use std::sync::Arc;

pub struct CatalogApi {
    catalog: Arc<CatalogRepository>,
    sections: Arc<SectionRepository>,
}

impl CatalogApi {
    pub fn new(catalog: Arc<CatalogRepository>, sections: Arc<SectionRepository>) -> Self {
        Self { catalog, sections }
    }

    /// All departments, ordered by English name
    pub fn list_departments(&self) -> ApiResult<Vec<Department>> {
        Ok(self.catalog.find_all_departments()?)
    }

    /// Courses of a department, ordered by English name
    pub fn list_courses(&self, dept_id: &str) -> ApiResult<Vec<Course>> {
        require_non_blank("dept_id", dept_id)?;
        Ok(self.catalog.find_courses_by_department(dept_id.trim())?)
    }

    /// Sections of a course, ordered by section number
    pub fn list_sections(&self, course_id: &str) -> ApiResult<Vec<Section>> {
        require_non_blank("course_id", course_id)?;
        Ok(self.sections.find_by_course(course_id.trim())?)
    }
}
