// ==========================================
// HTU Schedule - section lifecycle engine
// ==========================================
// add:     append `count` sections numbered max+1 .. max+count
// rebuild: delete every section of a course (students cascade),
//          then create sections 1..count
// count < 1 is a no-op for both; count above
// MAX_SECTIONS_PER_REQUEST is rejected before any write
// ==========================================

use crate::domain::catalog::Section;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::section_repo::SectionRepository;
use crate::repository::student_repo::StudentRepository;
use serde::Serialize;
use std::sync::Arc;

/// Upper bound on `count` for add/rebuild (xlsx column limit)
pub const MAX_SECTIONS_PER_REQUEST: i64 = 16_384;

/// What a rebuild removed and what it created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebuildReport {
    pub course_id: String,
    pub removed_sections: usize,
    /// Counted before the delete; the rows go with their sections
    pub removed_students: usize,
    pub sections: Vec<Section>,
}

impl RebuildReport {
    fn unchanged(course_id: &str) -> Self {
        Self {
            course_id: course_id.to_string(),
            removed_sections: 0,
            removed_students: 0,
            sections: Vec::new(),
        }
    }
}

// ==========================================
// SectionLifecycleEngine
// ==========================================
pub struct SectionLifecycleEngine {
    sections: Arc<SectionRepository>,
    students: Arc<StudentRepository>,
}

impl SectionLifecycleEngine {
    pub fn new(sections: Arc<SectionRepository>, students: Arc<StudentRepository>) -> Self {
        Self { sections, students }
    }

    /// Append sections after the current highest number
    ///
    /// # Arguments
    /// - `course_id`: target course
    /// - `count`: sections to add (< 1: nothing happens)
    /// - `capacity`: capacity of each new section
    ///
    /// # Returns
    /// The created sections, in number order
    pub fn add_sections(
        &self,
        course_id: &str,
        count: i64,
        capacity: i64,
    ) -> RepositoryResult<Vec<Section>> {
        if count < 1 {
            tracing::debug!(course_id, count, "add sections: nothing to do");
            return Ok(Vec::new());
        }

        let max = self.sections.max_section_number(course_id)?;
        let first = max.checked_add(1).ok_or_else(|| count_error(course_id, count))?;
        let new_sections = numbered_sections(course_id, first, count, capacity)?;
        self.sections.insert_batch(&new_sections)?;

        tracing::info!(
            course_id,
            first,
            last = first + count - 1,
            capacity,
            "sections added"
        );
        Ok(new_sections)
    }

    /// Replace every section of a course with sections 1..count
    ///
    /// Destructive: all students of the course are deleted with their
    /// sections. The replacement list is built first, so an invalid
    /// count leaves the course untouched; a failed delete aborts before
    /// anything is inserted.
    pub fn rebuild_sections(
        &self,
        course_id: &str,
        count: i64,
        capacity: i64,
    ) -> RepositoryResult<RebuildReport> {
        if count < 1 {
            tracing::debug!(course_id, count, "rebuild sections: nothing to do");
            return Ok(RebuildReport::unchanged(course_id));
        }

        let new_sections = numbered_sections(course_id, 1, count, capacity)?;
        let old_ids = self.sections.find_ids_by_course(course_id)?;
        let removed_students = self.students.count_by_sections(&old_ids)?;

        let removed_sections = match self.sections.delete_by_ids(&old_ids) {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(course_id, error = %e, "rebuild aborted: delete failed");
                return Err(e);
            }
        };

        self.sections.insert_batch(&new_sections)?;

        tracing::info!(
            course_id,
            removed_sections,
            removed_students,
            created = new_sections.len(),
            "sections rebuilt"
        );
        Ok(RebuildReport {
            course_id: course_id.to_string(),
            removed_sections,
            removed_students,
            sections: new_sections,
        })
    }
}

/// Sections `first..first+count`; rejects counts over the limit and numbers past i64
fn numbered_sections(
    course_id: &str,
    first: i64,
    count: i64,
    capacity: i64,
) -> RepositoryResult<Vec<Section>> {
    if count > MAX_SECTIONS_PER_REQUEST {
        return Err(count_error(course_id, count));
    }
    let end = first
        .checked_add(count)
        .ok_or_else(|| count_error(course_id, count))?;
    Ok((first..end)
        .map(|n| Section::new(course_id, n, capacity))
        .collect())
}

fn count_error(course_id: &str, count: i64) -> RepositoryError {
    tracing::warn!(course_id, count, "section count rejected");
    RepositoryError::FieldValueError {
        field: "count".to_string(),
        message: format!(
            "{} is out of range (1..={})",
            count, MAX_SECTIONS_PER_REQUEST
        ),
    }
}
