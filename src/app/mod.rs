// ==========================================
// HTU Schedule - application layer
// ==========================================
// AppState wiring and the Tauri commands
// ==========================================

pub mod state;
pub mod tauri_commands;

pub use state::{get_default_db_path, AppState};

#[cfg(feature = "tauri-app")]
pub use tauri_commands::*;
