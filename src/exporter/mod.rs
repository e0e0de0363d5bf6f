// ==========================================
// HTU Schedule - export layer
// ==========================================
// workbook_layout: pure sheet layout of the summary
// xlsx_writer:     rust_xlsxwriter rendering
// csv_writer:      flat summary table
// ==========================================

pub mod csv_writer;
pub mod error;
pub mod workbook_layout;
pub mod xlsx_writer;

pub use csv_writer::{write_summary_csv, write_summary_csv_file};
pub use error::{ExportError, ExportResult};
pub use workbook_layout::{
    sanitize_sheet_name, unique_sheet_names, workbook_layout, CourseHeader, SheetLayout,
};
pub use xlsx_writer::{workbook_bytes, write_workbook};
