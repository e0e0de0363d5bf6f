// ==========================================
// HTU Schedule - csv writer
// ==========================================
// Flat summary table, one record per section
// ==========================================

use crate::domain::report::SummaryRow;
use crate::exporter::error::{ExportError, ExportResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const CSV_HEADERS: [&str; 8] = [
    "department_en",
    "department_ar",
    "course_en",
    "course_ar",
    "section",
    "capacity",
    "enrolled",
    "students",
];

/// Write the summary rows as CSV into any writer
///
/// # Returns
/// Number of data records written
pub fn write_summary_csv<W: Write>(rows: &[SummaryRow], writer: W) -> ExportResult<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;

    for row in rows {
        wtr.write_record([
            row.dept_en.as_str(),
            row.dept_ar.as_str(),
            row.course_en.as_str(),
            row.course_ar.as_str(),
            &row.section.to_string(),
            &row.capacity.to_string(),
            &row.enrolled.to_string(),
            &row.student_names_display(),
        ])?;
    }

    wtr.flush()?;
    Ok(rows.len())
}

/// Write the summary rows to a CSV file (overwrites)
pub fn write_summary_csv_file(rows: &[SummaryRow], path: &Path) -> ExportResult<usize> {
    let file = File::create(path).map_err(ExportError::Io)?;
    let count = write_summary_csv(rows, file)?;
    tracing::info!(path = %path.display(), records = count, "csv written");
    Ok(count)
}
