//! # excelpack
//!
//! A small Rust library that encodes spreadsheet data into `.xlsx` files entirely in memory.
//!
//! ## Features
//!
//! - **No runtime format dependencies**: ZIP container, CRC-32 and OOXML parts are built by hand
//! - **Inline strings**: text cells carry their own value, no shared-string table
//! - **Stored entries**: archive entries are written uncompressed
//! - **Bold headers**: row 1 of every sheet uses the bold cell format
//! - **Reproducible output**: pin the timestamp via [`EncodeOptions`] or `SOURCE_DATE_EPOCH`
//! - **Type Safety**: cells are an explicit [`CellValue`] enum, not strings
//!
//! ## Quick Start
//!
//! ```rust
//! use excelpack::{encode_workbook, CellValue, Sheet, XLSX_MIME_TYPE};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sheet = Sheet::new("Report/2024:Q1", ["Name", "Amount"])
//!     .with_row([CellValue::from("Alice"), CellValue::from(1250.5)])
//!     .with_row([CellValue::from("Bob"), CellValue::from(980)]);
//!
//! let bytes = encode_workbook(&[sheet])?;
//! println!("{} bytes of {}", bytes.len(), XLSX_MIME_TYPE);
//! # Ok(())
//! # }
//! ```
//!
//! ### Writing to disk
//!
//! ```rust,no_run
//! use excelpack::writer::ExcelWriter;
//! use excelpack::{CellValue, EncodeOptions, Sheet};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut writer = ExcelWriter::with_options(EncodeOptions::from_env()?);
//! writer.add_sheet(Sheet::new("Sheet1", ["ID"]).with_row([CellValue::from(1)]));
//! writer.save("output.xlsx")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod encoder;
pub mod error;
pub mod report;
pub mod types;
pub mod writer;

pub use config::EncodeOptions;
pub use encoder::{encode_workbook, encode_workbook_with};
pub use error::{ExcelError, Result};
pub use types::{ArchivePart, CellValue, Sheet, XLSX_MIME_TYPE};
pub use writer::ExcelWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_imports() {
        // Test that all public types are accessible
        let _ = std::marker::PhantomData::<ExcelError>;
        let _ = std::marker::PhantomData::<ExcelWriter>;
        let _ = std::marker::PhantomData::<EncodeOptions>;
        assert_eq!(
            XLSX_MIME_TYPE,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }
}
