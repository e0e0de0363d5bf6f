// ==========================================
// HTU Schedule - reset and seed a database
// ==========================================
// Usage: reset_and_seed_db [db_path] [section_capacity]
// An existing file is copied to <db_path>.bak.<timestamp> first.
// ==========================================

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use htu_schedule::app::get_default_db_path;
use htu_schedule::config::config_manager::DEFAULT_SECTION_CAPACITY;
use htu_schedule::db::{init_schema, open_sqlite_connection};
use htu_schedule::engine::CatalogSeeder;
use htu_schedule::repository::CatalogRepository;

fn main() -> Result<()> {
    htu_schedule::logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    let capacity = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|c| *c >= 0)
        .unwrap_or(DEFAULT_SECTION_CAPACITY);

    backup_and_reset_db(&db_path)?;

    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("cannot open {}", db_path))?;
    init_schema(&conn).context("schema bootstrap failed")?;
    let conn = Arc::new(Mutex::new(conn));

    let report = CatalogSeeder::new(Arc::new(CatalogRepository::new(conn.clone())))
        .seed_if_empty(capacity)
        .context("catalog seeding failed")?;

    println!("Database: {}", db_path);
    println!(
        "Seeded {} departments, {} courses, {} sections (capacity {})",
        report.departments, report.courses, report.sections, capacity
    );
    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<()> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)
        .with_context(|| format!("backup to {} failed", backup_path))?;
    fs::remove_file(path).with_context(|| format!("cannot remove {}", db_path))?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}
