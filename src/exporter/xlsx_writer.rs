// ==========================================
// HTU Schedule - xlsx writer
// ==========================================
// Renders SheetLayout values with rust_xlsxwriter.
// Padding cells are left blank.
// ==========================================

use crate::exporter::error::{ExportError, ExportResult};
use crate::exporter::workbook_layout::SheetLayout;
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use std::path::Path;

/// Write the sheets to `path` (overwrites)
///
/// # Returns
/// - `Ok(sheet_count)`
/// - `Err(NothingToExport)`: no sheet to write
pub fn write_workbook(sheets: &[SheetLayout], path: &Path) -> ExportResult<usize> {
    let mut workbook = build_workbook(sheets)?;
    workbook.save(path)?;
    tracing::info!(path = %path.display(), sheets = sheets.len(), "workbook written");
    Ok(sheets.len())
}

/// Render the sheets into an in-memory xlsx file
pub fn workbook_bytes(sheets: &[SheetLayout]) -> ExportResult<Vec<u8>> {
    let mut workbook = build_workbook(sheets)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(sheets: &[SheetLayout]) -> ExportResult<Workbook> {
    if sheets.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let course_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let section_format = Format::new().set_bold();

    let mut workbook = Workbook::new();
    for sheet in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(&sheet.name)?;
        if sheet.right_to_left {
            ws.set_right_to_left(true);
        }

        for header in &sheet.course_headers {
            if header.is_merged() {
                ws.merge_range(
                    0,
                    header.first_col,
                    0,
                    header.last_col,
                    &header.title,
                    &course_format,
                )?;
            } else {
                ws.write_string_with_format(0, header.first_col, &header.title, &course_format)?;
            }
        }

        for (col, title) in sheet.section_headers.iter().enumerate() {
            ws.write_string_with_format(1, col as u16, title, &section_format)?;
        }

        for (col, lines) in sheet.columns.iter().enumerate() {
            for (i, line) in lines.iter().enumerate() {
                ws.write_string(2 + i as u32, col as u16, line)?;
            }
        }

        for col in 0..sheet.column_count() {
            ws.set_column_width(col as u16, sheet.column_width)?;
        }
    }

    Ok(workbook)
}
