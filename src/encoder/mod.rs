//! In-memory XLSX encoder
//!
//! This module turns a list of sheets into a complete `.xlsx` byte buffer:
//! - OOXML parts are rendered as plain XML text
//! - Text cells are inlined (no shared-string table)
//! - Entries are stored uncompressed in a hand-built ZIP container
//!
//! Nothing is written anywhere; the caller decides what to do with the bytes.

pub mod crc;
pub mod dos_time;
pub mod workbook;
pub mod worksheet;
pub mod xml_writer;
pub mod zip_writer;

use crate::config::EncodeOptions;
use crate::error::Result;
use crate::types::Sheet;

pub use crc::compute_crc32;
pub use dos_time::ZipDateTime;
pub use workbook::{assemble_package, Package};
pub use worksheet::{column_name, sanitize_sheet_name};
pub use xml_writer::escape_xml;
pub use zip_writer::StoredZipWriter;

/// Encode `sheets` into an `.xlsx` file, stamped with the current local time
///
/// # Examples
///
/// ```
/// use excelpack::{encode_workbook, CellValue, Sheet};
///
/// let sheet = Sheet::new("Data", ["A", "B"])
///     .with_row([CellValue::from(1), CellValue::from("x")])
///     .with_row([CellValue::from(2), CellValue::from("y")]);
///
/// let bytes = encode_workbook(&[sheet])?;
/// assert_eq!(&bytes[..4], b"PK\x03\x04");
/// # Ok::<(), excelpack::ExcelError>(())
/// ```
pub fn encode_workbook(sheets: &[Sheet]) -> Result<Vec<u8>> {
    encode_workbook_with(sheets, &EncodeOptions::default())
}

/// Encode `sheets` with explicit options
///
/// Input is validated before anything is rendered, so an error never leaves
/// a partial workbook behind.
pub fn encode_workbook_with(sheets: &[Sheet], options: &EncodeOptions) -> Result<Vec<u8>> {
    log::debug!("encoding workbook with {} sheet(s)", sheets.len());

    let package = assemble_package(sheets)?;
    let parts = package.into_parts();
    let modified = ZipDateTime::from_datetime(&options.resolve_modified());
    let bytes = StoredZipWriter::new(modified).write(&parts)?;

    log::debug!(
        "workbook encoded: {} parts, {} bytes",
        parts.len(),
        bytes.len()
    );
    Ok(bytes)
}
