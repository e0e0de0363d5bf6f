// ==========================================
// HTU Schedule - catalog entities
// ==========================================
// Department -> Course -> Section -> Student
// Aligned with the departments/courses/sections/students tables
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::Language;

// ==========================================
// Department
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name_en: String,
    pub name_ar: String,
}

impl Department {
    pub fn display_name(&self, lang: Language) -> &str {
        lang.pick(&self.name_en, &self.name_ar)
    }
}

// ==========================================
// Course
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub dept_id: String,
    pub name_en: String,
    pub name_ar: String,
}

impl Course {
    pub fn display_name(&self, lang: Language) -> &str {
        lang.pick(&self.name_en, &self.name_ar)
    }
}

// ==========================================
// Section
// ==========================================
// Invariant: 0 <= enrolled <= capacity, except after an explicit override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub course_id: String,
    pub section_number: i64,
    pub capacity: i64,
    pub enrolled: i64,
}

impl Section {
    /// Create an empty section with a fresh id
    pub fn new(course_id: &str, section_number: i64, capacity: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            section_number,
            capacity,
            enrolled: 0,
        }
    }

    /// Full when enrolled has reached (or passed) capacity
    pub fn is_full(&self) -> bool {
        self.enrolled >= self.capacity
    }

    /// Remaining seats, never negative
    pub fn remaining_seats(&self) -> i64 {
        (self.capacity - self.enrolled).max(0)
    }

    /// Select-box label: "#3 ( 12 / 20 )"
    pub fn label(&self) -> String {
        format!(
            "#{} ( {} / {} )",
            self.section_number, self.enrolled, self.capacity
        )
    }
}

// ==========================================
// Student
// ==========================================
// One record per registration; university_id may repeat across sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub university_id: String,
    pub major: String,
    pub advisor: String,
    pub section_id: String,
    pub created_at: DateTime<Utc>,
}

// ==========================================
// NewStudent - registration form payload
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub section_id: String,
    pub name: String,
    pub university_id: String,
    pub major: String,
    pub advisor: String,
}

impl NewStudent {
    /// Copy with every field trimmed
    pub fn trimmed(&self) -> Self {
        Self {
            section_id: self.section_id.trim().to_string(),
            name: self.name.trim().to_string(),
            university_id: self.university_id.trim().to_string(),
            major: self.major.trim().to_string(),
            advisor: self.advisor.trim().to_string(),
        }
    }

    /// Names of the required fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.section_id.trim().is_empty() {
            missing.push("section_id");
        }
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.university_id.trim().is_empty() {
            missing.push("university_id");
        }
        if self.major.trim().is_empty() {
            missing.push("major");
        }
        if self.advisor.trim().is_empty() {
            missing.push("advisor");
        }
        missing
    }

    /// Materialize the student record at `created_at`
    pub fn into_student(self, created_at: DateTime<Utc>) -> Student {
        Student {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            university_id: self.university_id,
            major: self.major,
            advisor: self.advisor,
            section_id: self.section_id,
            created_at,
        }
    }
}
