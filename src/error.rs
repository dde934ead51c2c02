//! Error types for the excelpack library

use thiserror::Error;

/// Result type alias for excelpack operations
pub type Result<T> = std::result::Result<T, ExcelError>;

/// Main error type for all encoding operations
#[derive(Error, Debug)]
pub enum ExcelError {
    /// The workbook has no sheets
    #[error("Workbook must contain at least one sheet")]
    EmptyWorkbook,

    /// A data row does not have one cell per header
    #[error("Row {row} of sheet '{sheet}' has {found} cells, expected {expected}")]
    RowWidthMismatch {
        sheet: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Two sheets end up with the same name (compared case-insensitively)
    #[error("Duplicate sheet name: '{0}'")]
    DuplicateSheetName(String),

    /// A ZIP field would overflow its fixed width
    #[error("Archive too large: {0}")]
    ArchiveTooLarge(String),

    /// Any other caller contract violation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
