// ==========================================
// HTU Schedule - action log repository
// ==========================================
// action_log table (audit trail of every mutating operation)
// ==========================================

mod core;
mod queries;


pub use core::ActionLogRepository;
