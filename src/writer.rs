//! Workbook writer that collects sheets and encodes them in one pass
//!
//! Sheets are held in memory until [`ExcelWriter::to_bytes`], [`ExcelWriter::write_to`]
//! or [`ExcelWriter::save`] is called; the encode itself never touches the disk.

use crate::config::EncodeOptions;
use crate::encoder::encode_workbook_with;
use crate::error::Result;
use crate::types::{CellValue, Sheet};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Collects sheets and produces an `.xlsx` file
///
/// # Examples
///
/// ```no_run
/// use excelpack::writer::ExcelWriter;
/// use excelpack::types::CellValue;
///
/// let mut writer = ExcelWriter::new();
/// writer.sheet(
///     "People",
///     ["Name", "Age"],
///     vec![
///         vec![CellValue::from("Alice"), CellValue::from(30)],
///         vec![CellValue::from("Bob"), CellValue::from(25)],
///     ],
/// );
/// writer.save("people.xlsx").unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExcelWriter {
    sheets: Vec<Sheet>,
    options: EncodeOptions,
}

impl ExcelWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        ExcelWriter {
            sheets: Vec::new(),
            options,
        }
    }

    /// Append a sheet; tab order follows call order
    pub fn add_sheet(&mut self, sheet: Sheet) -> &mut Self {
        self.sheets.push(sheet);
        self
    }

    /// Append a sheet built from a name, headers and rows
    pub fn sheet<N, H, S>(&mut self, name: N, headers: H, rows: Vec<Vec<CellValue>>) -> &mut Self
    where
        N: Into<String>,
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sheet = Sheet::new(name, headers);
        sheet.rows = rows;
        self.add_sheet(sheet)
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Encode all sheets into an in-memory `.xlsx` buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_workbook_with(&self.sheets, &self.options)
    }

    /// Encode and write the whole file to `out`
    ///
    /// Encoding finishes before the first byte is written.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        let bytes = self.to_bytes()?;
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }

    /// Encode and save to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path.as_ref(), &bytes)?;
        log::debug!(
            "saved {} bytes to {}",
            bytes.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExcelError;
    use tempfile::tempdir;

    #[test]
    fn test_save() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.xlsx");

        let mut writer = ExcelWriter::new();
        writer.sheet(
            "Sheet1",
            ["Name", "Age"],
            vec![vec![CellValue::from("Alice"), CellValue::from(30)]],
        );
        writer.save(&path)?;

        let saved = fs::read(&path)?;
        assert_eq!(&saved[..4], b"PK\x03\x04");
        Ok(())
    }

    #[test]
    fn test_write_to_matches_to_bytes() -> Result<()> {
        let at = chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let mut writer = ExcelWriter::with_options(EncodeOptions::new().with_modified(at));
        writer.add_sheet(Sheet::new("A", ["x"]));
        writer.add_sheet(Sheet::new("B", ["y"]));
        assert_eq!(writer.sheet_count(), 2);
        let names: Vec<&str> = writer.sheets().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);

        let mut out = Vec::new();
        writer.write_to(&mut out)?;
        assert_eq!(out, writer.to_bytes()?);
        Ok(())
    }

    #[test]
    fn test_failed_encode_writes_nothing() {
        let mut out = Vec::new();
        let err = ExcelWriter::new().write_to(&mut out).unwrap_err();
        assert!(matches!(err, ExcelError::EmptyWorkbook));
        assert!(out.is_empty());
    }
}
