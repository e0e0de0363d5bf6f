// ==========================================
// HTU Schedule - Tauri entry point
// ==========================================
// Stack: Tauri + Rust + SQLite
// ==========================================

// No console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(feature = "tauri-app")]
fn main() {
    use htu_schedule::app::tauri_commands::*;
    use htu_schedule::app::{get_default_db_path, AppState};

    htu_schedule::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} {}", htu_schedule::APP_NAME, htu_schedule::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!(db_path = %db_path, "using database");

    let app_state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "AppState initialization failed");
            std::process::exit(1);
        }
    };

    let result = tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // ==========================================
            // Catalog (3)
            // ==========================================
            list_departments,
            list_courses,
            list_sections,
            // ==========================================
            // Registration (2)
            // ==========================================
            register_student,
            register_student_with_override,
            // ==========================================
            // Student lookup (1)
            // ==========================================
            lookup_student,
            // ==========================================
            // Section administration (3)
            // ==========================================
            add_sections,
            get_rebuild_warning,
            rebuild_sections,
            // ==========================================
            // Summary & export (4)
            // ==========================================
            get_summary,
            export_summary_workbook,
            export_summary_csv,
            list_recent_actions,
            // ==========================================
            // Language (2)
            // ==========================================
            set_language,
            get_language,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        tracing::error!(error = %e, "Tauri application failed");
        std::process::exit(1);
    }
    tracing::info!("Tauri application exited");
}

#[cfg(not(feature = "tauri-app"))]
fn main() {
    println!("==================================================");
    println!("{} {}", htu_schedule::APP_NAME, htu_schedule::VERSION);
    println!("==================================================");
    println!();
    println!("This executable needs the tauri-app feature:");
    println!("  cargo run --features tauri-app");
    println!();
    println!("Library use:");
    println!("  use htu_schedule::app::AppState;");
    println!();
    println!("Reset and seed a database:");
    println!("  cargo run --bin reset_and_seed_db [db_path]");
}
