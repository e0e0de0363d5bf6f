// ==========================================
// SummaryApi integration tests
// ==========================================
// Scope:
// 1. get_summary: ordering, student lists, course filter
// 2. export_workbook: sheets, merged headers, student cells (read back with calamine)
// 3. export_csv: flat table
// ==========================================

mod helpers;

use calamine::{open_workbook, Data, Reader, Xlsx};
use helpers::api_test_helper::*;
use htu_schedule::config::config_manager::config_keys;
use htu_schedule::domain::action_log::ActionType;
use htu_schedule::domain::types::Language;
use htu_schedule::exporter::sanitize_sheet_name;

fn cell(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => format!("{:?}", other),
    }
}

async fn register(env: &ApiTestEnv, course: &str, section_index: usize, uid: &str) {
    let course = env.course(course);
    let section = &env.sections(&course.id)[section_index];
    env.state
        .registration_api
        .register(&form(&section.id, uid))
        .await
        .expect("register");
}

// ==========================================
// get_summary
// ==========================================

#[tokio::test]
async fn test_summary_rows_and_order() {
    let env = ApiTestEnv::new().expect("test environment");
    register(&env, "IoT", 0, "S1").await;
    register(&env, "IoT", 0, "S2").await;

    let rows = env.state.summary_api.get_summary(None).unwrap();
    // One row per seeded section
    assert_eq!(rows.len(), 175);

    let depts: Vec<&str> = rows.iter().map(|r| r.dept_en.as_str()).collect();
    let mut sorted = depts.clone();
    sorted.sort();
    assert_eq!(depts, sorted);
    assert_eq!(rows[0].dept_en, "Common Courses");
    assert_eq!(rows[0].dept_ar, "مساقات مشتركة");

    assert_eq!(rows[0].course_en, "IoT");
    assert_eq!(rows[0].section, 1);
    assert_eq!(rows[0].enrolled, 2);
    assert_eq!(rows[0].student_names_display(), "Student S1, Student S2");
    assert_eq!(rows[1].section, 2);
    assert_eq!(rows[1].student_names_display(), "-");
}

#[test]
fn test_summary_filter() {
    let env = ApiTestEnv::new().expect("test environment");
    let api = &env.state.summary_api;

    let rows = api.get_summary(Some("networ")).unwrap();
    // Networking (12) + Network Security (2)
    assert_eq!(rows.len(), 14);
    assert!(rows.iter().all(|r| r.course_en.to_lowercase().contains("networ")));

    assert_eq!(api.get_summary(Some("   ")).unwrap().len(), 175);
    assert!(api.get_summary(Some("quantum")).unwrap().is_empty());
}

// ==========================================
// export_workbook
// ==========================================

#[tokio::test]
async fn test_export_workbook_english() {
    let env = ApiTestEnv::new().expect("test environment");
    register(&env, "IoT", 0, "S100").await;
    register(&env, "IoT", 0, "S101").await;
    register(&env, "Cloud Computing", 1, "S102").await;

    let dir = tempfile::tempdir().unwrap();
    let path = env
        .state
        .summary_api
        .default_export_path(dir.path())
        .unwrap();
    assert!(path.ends_with("HTU_Schedule_Final.xlsx"));

    let resp = env
        .state
        .summary_api
        .export_workbook(&path, Language::En)
        .expect("export");
    assert_eq!(resp.written, 4);
    assert!(resp.message.contains("HTU_Schedule_Final.xlsx"));

    let mut workbook: Xlsx<_> = open_workbook(&path).expect("open workbook");
    assert_eq!(
        workbook.sheet_names(),
        vec![
            "Common Courses".to_string(),
            "Computer Science".to_string(),
            "Cyber Security".to_string(),
            "Data Science & AI".to_string(),
        ]
    );

    let common = workbook.worksheet_range("Common Courses").unwrap();
    // Course titles: IoT spans columns 0-1, Cloud Computing 2-3
    assert_eq!(cell(&common, 0, 0), "IoT");
    assert_eq!(cell(&common, 0, 1), "");
    assert_eq!(cell(&common, 0, 2), "Cloud Computing");
    assert_eq!(cell(&common, 0, 6), ".NET");

    assert_eq!(cell(&common, 1, 0), "Section 1");
    assert_eq!(cell(&common, 1, 1), "Section 2");
    assert_eq!(cell(&common, 1, 3), "Section 2");

    // Students in registration order, padding left blank
    assert_eq!(cell(&common, 2, 0), "S100 | Computer Science");
    assert_eq!(cell(&common, 3, 0), "S101 | Computer Science");
    assert_eq!(cell(&common, 2, 3), "S102 | Computer Science");
    assert_eq!(cell(&common, 3, 3), "");
    assert_eq!(cell(&common, 2, 1), "");

    let logs = env
        .action_log_repo
        .find_by_action_type(ActionType::ExportWorkbook.as_str(), 10)
        .unwrap();
    assert_eq!(logs.len(), 1);
}

#[test]
fn test_export_workbook_arabic() {
    let env = ApiTestEnv::new().expect("test environment");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ar.xlsx");

    env.state
        .summary_api
        .export_workbook(&path, Language::Ar)
        .expect("export");

    let mut workbook: Xlsx<_> = open_workbook(&path).expect("open workbook");
    let names = workbook.sheet_names();
    assert_eq!(names.len(), 4);
    assert_eq!(names[0], "مساقات مشتركة");
    assert_eq!(names[3], sanitize_sheet_name("علم البيانات والذكاء الاصطناعي"));
    assert!(names.iter().all(|n| n.chars().count() <= 31));

    let common = workbook.worksheet_range(&names[0]).unwrap();
    // Course Arabic names equal the English ones
    assert_eq!(cell(&common, 0, 0), "IoT");
    assert_eq!(cell(&common, 1, 0), "شعبة 1");
}

#[test]
fn test_export_file_name_is_configurable() {
    let env = ApiTestEnv::with_settings(&[(config_keys::EXPORT_FILE_NAME, "schedule.xlsx")])
        .expect("test environment");
    let dir = tempfile::tempdir().unwrap();
    let path = env
        .state
        .summary_api
        .default_export_path(dir.path())
        .unwrap();
    assert_eq!(path, dir.path().join("schedule.xlsx"));
}

// ==========================================
// export_csv
// ==========================================

#[tokio::test]
async fn test_export_csv() {
    let env = ApiTestEnv::new().expect("test environment");
    register(&env, "IoT", 1, "C1").await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.csv");
    let resp = env.state.summary_api.export_csv(&path).expect("csv export");
    assert_eq!(resp.written, 175);

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    assert_eq!(
        rdr.headers().unwrap().iter().collect::<Vec<_>>(),
        vec![
            "department_en",
            "department_ar",
            "course_en",
            "course_ar",
            "section",
            "capacity",
            "enrolled",
            "students"
        ]
    );

    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 175);
    assert_eq!(&records[0][0], "Common Courses");
    assert_eq!(&records[0][2], "IoT");
    assert_eq!(&records[0][7], "-");
    assert_eq!(&records[1][4], "2");
    assert_eq!(&records[1][6], "1");
    assert_eq!(&records[1][7], "Student C1");
}
