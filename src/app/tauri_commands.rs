// ==========================================
// HTU Schedule - Tauri commands (split by view)
// ==========================================
// Thin wrappers: call the API, serialize the result to JSON,
// map ApiError to an ErrorResponse JSON string
// ==========================================

#![cfg(feature = "tauri-app")]

mod catalog;
mod common;
mod locale;
mod registration;
mod sections;
mod student;
mod summary;

pub use catalog::*;
pub use locale::*;
pub use registration::*;
pub use sections::*;
pub use student::*;
pub use summary::*;
