// ==========================================
// Concurrent enrollment tests
// ==========================================
// Scope:
// 1. CONDITIONAL mode: racing registrations never overrun capacity
// 2. READ_THEN_WRITE mode: sequential registrations stop at capacity
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use htu_schedule::api::RegistrationStatus;
use htu_schedule::domain::types::EnrollmentMode;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_conditional_mode_never_overruns() {
    let env = ApiTestEnv::with_mode(EnrollmentMode::Conditional).expect("test environment");
    let section = env.first_section("Programming");
    env.section_repo.update_capacity(&section.id, 5).unwrap();

    let mut handles = Vec::new();
    for i in 0..20 {
        let api = env.state.registration_api.clone();
        let f = form(&section.id, &format!("C{:02}", i));
        handles.push(tokio::spawn(async move { api.register(&f).await }));
    }

    let mut registered = 0;
    let mut full = 0;
    for h in handles {
        match h.await.unwrap().expect("register").status {
            RegistrationStatus::Registered => registered += 1,
            RegistrationStatus::Full => full += 1,
        }
    }

    assert_eq!(registered, 5);
    assert_eq!(full, 15);
    let after = env.reload(&section.id);
    assert_eq!((after.capacity, after.enrolled), (5, 5));
    assert_eq!(env.student_repo.find_by_section(&section.id).unwrap().len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_conditional_override_race_stays_consistent() {
    let env = ApiTestEnv::with_mode(EnrollmentMode::Conditional).expect("test environment");
    let section = env.first_section("Cryptography");
    env.section_repo.update_capacity(&section.id, 0).unwrap();

    let mut handles = Vec::new();
    for i in 0..6 {
        let api = env.state.registration_api.clone();
        let f = form(&section.id, &format!("O{}", i));
        handles.push(tokio::spawn(async move { api.register_with_override(&f).await }));
    }
    let succeeded = {
        let mut n = 0;
        for h in handles {
            if h.await.unwrap().is_ok() {
                n += 1;
            }
        }
        n
    };

    // Every success raised capacity by one before taking its seat
    let after = env.reload(&section.id);
    assert!(after.enrolled <= after.capacity);
    assert_eq!(after.enrolled, succeeded);
    assert_eq!(
        env.student_repo.find_by_section(&section.id).unwrap().len() as i64,
        succeeded
    );
}

#[tokio::test]
async fn test_read_then_write_sequential_stops_at_capacity() {
    let env = ApiTestEnv::new().expect("test environment");
    let section = env.first_section("Forensics");
    env.section_repo.update_capacity(&section.id, 3).unwrap();

    let api = &env.state.registration_api;
    let mut statuses = Vec::new();
    for i in 0..5 {
        let resp = api.register(&form(&section.id, &format!("R{}", i))).await.unwrap();
        statuses.push(resp.status);
    }

    assert_eq!(
        statuses,
        vec![
            RegistrationStatus::Registered,
            RegistrationStatus::Registered,
            RegistrationStatus::Registered,
            RegistrationStatus::Full,
            RegistrationStatus::Full,
        ]
    );
    assert_eq!(env.reload(&section.id).enrolled, 3);
}
