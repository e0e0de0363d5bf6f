// ==========================================
// StudentApi::lookup integration tests
// ==========================================
// Scope:
// 1. identity from the earliest registration
// 2. every registration with course names and section number
// 3. empty state, blank id, unresolvable section fallback
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use htu_schedule::api::ApiError;

#[tokio::test]
async fn test_lookup_lists_every_registration() {
    let env = ApiTestEnv::new().expect("test environment");
    let programming = env.first_section("Programming");
    let security = env.sections(&env.course("Security").id)[2].clone();

    let api = &env.state.registration_api;
    let mut first = form(&programming.id, "2020123");
    first.name = "Sara Khalil".to_string();
    api.register(&first).await.unwrap();

    let mut second = form(&security.id, "2020123");
    second.name = "S. Khalil".to_string();
    second.major = "Cyber Security".to_string();
    api.register(&second).await.unwrap();

    let found = env
        .state
        .student_api
        .lookup(" 2020123 ")
        .unwrap()
        .expect("student found");

    assert_eq!(found.student.name, "Sara Khalil");
    assert_eq!(found.student.major, "Computer Science");
    assert_eq!(found.registrations.len(), 2);

    let r0 = &found.registrations[0];
    assert_eq!(r0.course_en, "Programming");
    assert_eq!(r0.course_ar, "Programming");
    assert_eq!(r0.section_number, 1);

    let r1 = &found.registrations[1];
    assert_eq!(r1.course_en, "Security");
    assert_eq!(r1.section_number, 3);
    assert!(r1.registered_at >= r0.registered_at);
}

#[test]
fn test_lookup_no_match_is_empty_state() {
    let env = ApiTestEnv::new().expect("test environment");
    assert!(env.state.student_api.lookup("9999999").unwrap().is_none());
}

#[test]
fn test_lookup_blank_id_is_invalid() {
    let env = ApiTestEnv::new().expect("test environment");
    let err = env.state.student_api.lookup("   ").unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_lookup_unresolvable_section_falls_back() {
    let env = ApiTestEnv::new().expect("test environment");

    let conn = open_unchecked(&env.db_path);
    insert_student_row(&conn, "ORPHAN1", "section-that-was-never-there");

    let found = env
        .state
        .student_api
        .lookup("ORPHAN1")
        .unwrap()
        .expect("student found");
    assert_eq!(found.registrations.len(), 1);
    assert_eq!(found.registrations[0].course_en, "Unknown");
    assert_eq!(found.registrations[0].course_ar, "Unknown");
    assert_eq!(found.registrations[0].section_number, 0);
}
