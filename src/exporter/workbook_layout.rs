// ==========================================
// HTU Schedule - spreadsheet layout
// ==========================================
// Pure function of the summary rows and the display language.
// One sheet per department, one column per section:
//   row 0   course title (merged across the course's sections)
//   row 1   "Section N" / "شعبة N"
//   row 2.. "{university_id} | {major}" per enrolled student
// Columns are padded to the tallest section of the sheet.
// ==========================================

use crate::domain::report::SummaryRow;
use crate::domain::types::Language;
use crate::i18n;
use std::collections::HashSet;

/// Excel limit on sheet name length (characters)
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const FORBIDDEN_SHEET_CHARS: &[char] = &['\\', '/', '?', '*', '[', ']', ':'];

/// Course title cell spanning the course's section columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseHeader {
    pub title: String,
    pub first_col: u16,
    pub last_col: u16,
}

impl CourseHeader {
    pub fn is_merged(&self) -> bool {
        self.last_col > self.first_col
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub right_to_left: bool,
    pub column_width: f64,
    pub course_headers: Vec<CourseHeader>,
    /// Row 1, one entry per column
    pub section_headers: Vec<String>,
    /// Student lines per column (unpadded)
    pub columns: Vec<Vec<String>>,
}

impl SheetLayout {
    pub fn column_count(&self) -> usize {
        self.section_headers.len()
    }

    /// Tallest section of the sheet
    pub fn body_height(&self) -> usize {
        self.columns.iter().map(|c| c.len()).max().unwrap_or(0)
    }

    /// Body rows (row 2..) padded with empty strings
    pub fn body_rows(&self) -> Vec<Vec<String>> {
        (0..self.body_height())
            .map(|r| {
                self.columns
                    .iter()
                    .map(|col| col.get(r).cloned().unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// Build every sheet of the export
///
/// # Arguments
/// - `rows`: summary rows in report order
/// - `lang`: display language (titles, headers, sheet names, direction)
/// - `column_width`: width of every column, in characters
pub fn workbook_layout(rows: &[SummaryRow], lang: Language, column_width: f64) -> Vec<SheetLayout> {
    let mut sheets = Vec::new();
    let mut raw_names = Vec::new();
    let all: Vec<&SummaryRow> = rows.iter().collect();

    for dept_rows in group_by(&all, |r| r.dept_id.as_str()) {
        let mut sheet = SheetLayout {
            name: String::new(),
            right_to_left: lang.direction().is_rtl(),
            column_width,
            course_headers: Vec::new(),
            section_headers: Vec::new(),
            columns: Vec::new(),
        };

        for course_rows in group_by(&dept_rows, |r| r.course_id.as_str()) {
            let first_col = sheet.section_headers.len() as u16;
            for row in &course_rows {
                let number = row.section.to_string();
                sheet.section_headers.push(i18n::t_for_with_args(
                    lang,
                    "export.section_header",
                    &[("number", number.as_str())],
                ));
                sheet.columns.push(
                    row.students
                        .iter()
                        .map(|s| format!("{} | {}", s.university_id, s.major))
                        .collect(),
                );
            }
            sheet.course_headers.push(CourseHeader {
                title: course_rows[0].course_name(lang).to_string(),
                first_col,
                last_col: first_col + course_rows.len() as u16 - 1,
            });
        }

        raw_names.push(dept_rows[0].dept_name(lang).to_string());
        sheets.push(sheet);
    }

    for (sheet, name) in sheets.iter_mut().zip(unique_sheet_names(&raw_names)) {
        sheet.name = name;
    }
    sheets
}

/// Group rows by key, keeping first-appearance order of keys and rows
fn group_by<'a, F>(rows: &[&'a SummaryRow], key: F) -> Vec<Vec<&'a SummaryRow>>
where
    F: Fn(&SummaryRow) -> &str,
{
    let mut order: Vec<String> = Vec::new();
    let mut groups: Vec<Vec<&'a SummaryRow>> = Vec::new();
    for &row in rows {
        let k = key(row);
        match order.iter().position(|o| o == k) {
            Some(i) => groups[i].push(row),
            None => {
                order.push(k.to_string());
                groups.push(vec![row]);
            }
        }
    }
    groups
}

/// Strip forbidden characters and cut to 31 characters
pub fn sanitize_sheet_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !FORBIDDEN_SHEET_CHARS.contains(c))
        .collect();
    // Excel rejects names starting or ending with an apostrophe
    let trimmed = cleaned.trim().trim_matches('\'').trim();
    trimmed.chars().take(MAX_SHEET_NAME_CHARS).collect::<String>().trim_end().to_string()
}

/// Sanitize every name, then make them unique (case-insensitive)
///
/// Empty names become `Sheet{n}` (1-based position); repeats get a
/// ` (k)` suffix that still fits in 31 characters.
pub fn unique_sheet_names(raw: &[String]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(raw.len());

    for (i, name) in raw.iter().enumerate() {
        let mut base = sanitize_sheet_name(name);
        if base.is_empty() {
            base = format!("Sheet{}", i + 1);
        }

        let mut candidate = base.clone();
        let mut k = 2;
        while used.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({})", k);
            let keep = MAX_SHEET_NAME_CHARS - suffix.chars().count();
            let head: String = base.chars().take(keep).collect();
            candidate = format!("{}{}", head.trim_end(), suffix);
            k += 1;
        }

        used.insert(candidate.to_lowercase());
        names.push(candidate);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Student;
    use chrono::Utc;

    fn student(uid: &str, major: &str) -> Student {
        Student {
            id: uid.to_string(),
            name: format!("Name {}", uid),
            university_id: uid.to_string(),
            major: major.to_string(),
            advisor: "Dr".to_string(),
            section_id: String::new(),
            created_at: Utc::now(),
        }
    }

    fn row(dept: (&str, &str, &str), course: (&str, &str), section: i64, students: Vec<Student>) -> SummaryRow {
        SummaryRow {
            section_id: format!("{}-{}", course.0, section),
            dept_id: dept.0.to_string(),
            dept_en: dept.1.to_string(),
            dept_ar: dept.2.to_string(),
            course_id: course.0.to_string(),
            course_en: course.1.to_string(),
            course_ar: format!("{} (ar)", course.1),
            section,
            capacity: 20,
            enrolled: students.len() as i64,
            students,
        }
    }

    const CS: (&str, &str, &str) = ("D1", "Computer Science", "علم الحاسوب");
    const SEC: (&str, &str, &str) = ("D2", "Cyber Security", "الأمن السيبراني");

    fn sample() -> Vec<SummaryRow> {
        vec![
            row(CS, ("C1", "Programming"), 1, vec![student("1001", "CS"), student("1002", "AI")]),
            row(CS, ("C1", "Programming"), 2, vec![]),
            row(CS, ("C2", "ERP Systems"), 1, vec![student("1003", "CS"), student("1004", "CS"), student("1005", "DS")]),
            row(SEC, ("C3", "Security"), 1, vec![]),
        ]
    }

    #[test]
    fn test_one_sheet_per_department() {
        let sheets = workbook_layout(&sample(), Language::En, 25.0);
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "Computer Science");
        assert_eq!(sheets[1].name, "Cyber Security");
        assert!(!sheets[0].right_to_left);
        assert_eq!(sheets[0].column_width, 25.0);
    }

    #[test]
    fn test_headers_and_merges() {
        let sheets = workbook_layout(&sample(), Language::En, 25.0);
        let cs = &sheets[0];

        assert_eq!(cs.column_count(), 3);
        assert_eq!(
            cs.course_headers,
            vec![
                CourseHeader {
                    title: "Programming".to_string(),
                    first_col: 0,
                    last_col: 1
                },
                CourseHeader {
                    title: "ERP Systems".to_string(),
                    first_col: 2,
                    last_col: 2
                },
            ]
        );
        assert!(cs.course_headers[0].is_merged());
        assert!(!cs.course_headers[1].is_merged());
        assert_eq!(cs.section_headers, vec!["Section 1", "Section 2", "Section 1"]);
    }

    #[test]
    fn test_body_padding() {
        let sheets = workbook_layout(&sample(), Language::En, 25.0);
        let cs = &sheets[0];
        assert_eq!(cs.body_height(), 3);

        let body = cs.body_rows();
        assert_eq!(body[0], vec!["1001 | CS", "", "1003 | CS"]);
        assert_eq!(body[1], vec!["1002 | AI", "", "1004 | CS"]);
        assert_eq!(body[2], vec!["", "", "1005 | DS"]);

        assert_eq!(sheets[1].body_height(), 0);
        assert!(sheets[1].body_rows().is_empty());
    }

    #[test]
    fn test_arabic_layout() {
        let sheets = workbook_layout(&sample(), Language::Ar, 25.0);
        assert_eq!(sheets[0].name, "علم الحاسوب");
        assert!(sheets[0].right_to_left);
        assert_eq!(sheets[0].course_headers[0].title, "Programming (ar)");
        assert_eq!(sheets[0].section_headers[1], "شعبة 2");
    }

    #[test]
    fn test_empty_report_has_no_sheets() {
        assert!(workbook_layout(&[], Language::En, 25.0).is_empty());
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Data Science & AI"), "Data Science & AI");
        assert_eq!(sanitize_sheet_name("A/B\\C?D*E[F]G:H"), "ABCDEFGH");
        assert_eq!(sanitize_sheet_name("'quoted'"), "quoted");

        let long = "Principles of Data Science and Computing Systems";
        // Cut at 31 characters, then the trailing space is dropped
        assert_eq!(sanitize_sheet_name(long), "Principles of Data Science and");
        assert_eq!(sanitize_sheet_name(&"y".repeat(50)).chars().count(), 31);

        let arabic = "علم البيانات والذكاء الاصطناعي والتعلم العميق";
        assert!(sanitize_sheet_name(arabic).chars().count() <= 31);
    }

    #[test]
    fn test_unique_sheet_names() {
        let raw = vec![
            "Security".to_string(),
            "security".to_string(),
            "[]/".to_string(),
            "Security".to_string(),
            "x".repeat(40),
            "x".repeat(35),
        ];
        let names = unique_sheet_names(&raw);
        assert_eq!(names[0], "Security");
        assert_eq!(names[1], "security (2)");
        assert_eq!(names[2], "Sheet3");
        assert_eq!(names[3], "Security (3)");
        assert_eq!(names[4], "x".repeat(31));
        assert_eq!(names[5], format!("{} (2)", "x".repeat(27)));
        assert!(names.iter().all(|n| n.chars().count() <= 31));
    }
}
