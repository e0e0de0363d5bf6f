// ==========================================
// HTU Schedule - read models
// ==========================================
// SummaryRow: one row per section (summary table / export source)
// StudentLookup: all registrations of one university id
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Student;
use crate::domain::types::Language;

// ==========================================
// SummaryRow
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub section_id: String,
    pub dept_id: String,
    pub dept_en: String,
    pub dept_ar: String,
    pub course_id: String,
    pub course_en: String,
    pub course_ar: String,
    pub section: i64,
    pub capacity: i64,
    pub enrolled: i64,
    pub students: Vec<Student>,
}

impl SummaryRow {
    pub fn dept_name(&self, lang: Language) -> &str {
        lang.pick(&self.dept_en, &self.dept_ar)
    }

    pub fn course_name(&self, lang: Language) -> &str {
        lang.pick(&self.course_en, &self.course_ar)
    }

    /// Student names joined by ", " or "-" when the section is empty
    pub fn student_names_display(&self) -> String {
        if self.students.is_empty() {
            return "-".to_string();
        }
        self.students
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Case-insensitive match of the course name in either locale
    pub fn matches_course(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.course_en.to_lowercase().contains(&term)
            || self.course_ar.to_lowercase().contains(&term)
    }
}

// ==========================================
// Student lookup
// ==========================================

/// One registration of a looked-up student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDetail {
    pub student_id: String,
    pub section_id: String,
    pub course_en: String,
    pub course_ar: String,
    /// 0 when the section can no longer be resolved
    pub section_number: i64,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentLookup {
    /// Base identity (earliest registration)
    pub student: Student,
    pub registrations: Vec<RegistrationDetail>,
}
