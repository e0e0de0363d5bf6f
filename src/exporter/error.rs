// ==========================================
// HTU Schedule - export errors
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no department has sections to export")]
    NothingToExport,

    #[error("xlsx write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
