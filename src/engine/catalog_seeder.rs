// ==========================================
// HTU Schedule - catalog seeder
// ==========================================
// Loads the static catalog into an empty store, in one transaction.
// Department Arabic names come from the locale table;
// course Arabic names equal the English names.
// ==========================================

use crate::config::seed_catalog::{SeedDepartment, INITIAL_CATALOG};
use crate::domain::catalog::{Course, Department, Section};
use crate::domain::types::Language;
use crate::i18n;
use crate::repository::catalog_repo::{CatalogBatch, CatalogRepository};
use crate::repository::error::RepositoryResult;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub departments: usize,
    pub courses: usize,
    pub sections: usize,
    /// True when the store already had departments
    pub skipped: bool,
}

// ==========================================
// CatalogSeeder
// ==========================================
pub struct CatalogSeeder {
    catalog: Arc<CatalogRepository>,
    catalog_data: &'static [SeedDepartment],
}

impl CatalogSeeder {
    pub fn new(catalog: Arc<CatalogRepository>) -> Self {
        Self {
            catalog,
            catalog_data: INITIAL_CATALOG,
        }
    }

    /// Seed from a different static catalog
    pub fn with_catalog(catalog: Arc<CatalogRepository>, data: &'static [SeedDepartment]) -> Self {
        Self {
            catalog,
            catalog_data: data,
        }
    }

    /// Insert the catalog when no department exists yet
    ///
    /// # Arguments
    /// - `section_capacity`: capacity of every seeded section
    pub fn seed_if_empty(&self, section_capacity: i64) -> RepositoryResult<SeedReport> {
        if !self.catalog.is_empty()? {
            tracing::debug!("catalog already present, seeding skipped");
            return Ok(SeedReport {
                departments: 0,
                courses: 0,
                sections: 0,
                skipped: true,
            });
        }

        let batches = build_batches(self.catalog_data, section_capacity);
        let (departments, courses, sections) = self.catalog.insert_catalog(&batches)?;

        tracing::info!(departments, courses, sections, "catalog seeded");
        Ok(SeedReport {
            departments,
            courses,
            sections,
            skipped: false,
        })
    }
}

/// Materialize ids and rows for the static catalog
fn build_batches(data: &[SeedDepartment], section_capacity: i64) -> Vec<CatalogBatch> {
    data.iter()
        .map(|d| {
            let department = Department {
                id: uuid::Uuid::new_v4().to_string(),
                name_en: d.name.to_string(),
                name_ar: arabic_department_name(d),
            };
            let courses = d
                .courses
                .iter()
                .map(|c| {
                    let course = Course {
                        id: uuid::Uuid::new_v4().to_string(),
                        dept_id: department.id.clone(),
                        name_en: c.name.to_string(),
                        name_ar: c.name.to_string(),
                    };
                    let sections = (1..=i64::from(c.sections))
                        .map(|n| Section::new(&course.id, n, section_capacity))
                        .collect();
                    (course, sections)
                })
                .collect();
            CatalogBatch {
                department,
                courses,
            }
        })
        .collect()
}

fn arabic_department_name(d: &SeedDepartment) -> String {
    let name = i18n::t_for(Language::Ar, d.name_key);
    if name.is_empty() || name.ends_with(d.name_key) {
        tracing::warn!(key = d.name_key, "missing Arabic department name, using English");
        return d.name.to_string();
    }
    name
}
