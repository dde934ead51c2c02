//! Type definitions for workbook data

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// MIME type of the produced `.xlsx` buffer
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Represents a single cell value in a worksheet
///
/// With the `serde` feature the variant is untagged, so a JSON row such as
/// `[1, "x"]` deserializes directly into `[Number(1.0), Text("x")]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CellValue {
    /// Numeric value. Non-finite values are written as text.
    Number(f64),
    /// Text value, always written as an inline string
    Text(String),
}

impl CellValue {
    /// Returns the number if this is a finite numeric cell
    pub fn as_finite_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Text written for this cell when it is not rendered as a number
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.is_nan() => "NaN".to_string(),
            CellValue::Number(n) if n.is_infinite() && *n > 0.0 => "Infinity".to_string(),
            CellValue::Number(n) if n.is_infinite() => "-Infinity".to_string(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Number(f)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Number(i as f64)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Number(f64::from(i))
    }
}

impl From<u32> for CellValue {
    fn from(i: u32) -> Self {
        CellValue::Number(f64::from(i))
    }
}

/// A named sheet: one header row followed by data rows
///
/// Every row is expected to have exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sheet {
    /// Display name, sanitized at encode time
    pub name: String,
    /// Header labels for row 1
    pub headers: Vec<String>,
    /// Data rows, written from row 2 onward
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a header-only sheet
    pub fn new<N, I, S>(name: N, headers: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Sheet {
            name: name.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a data row
    pub fn push_row<I, V>(&mut self, cells: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Builder-style variant of [`Sheet::push_row`]
    pub fn with_row<I, V>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.push_row(cells);
        self
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// One file inside the ZIP container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePart {
    /// POSIX-style path without a leading slash
    pub path: String,
    /// Raw bytes, stored uncompressed
    pub content: Vec<u8>,
}

impl ArchivePart {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        ArchivePart {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from(42i64), CellValue::Number(42.0));
        assert_eq!(CellValue::from(7u32), CellValue::Number(7.0));
        assert_eq!(CellValue::from("x"), CellValue::Text("x".to_string()));
        assert_eq!(CellValue::from(1.5).as_finite_number(), Some(1.5));
    }

    #[test]
    fn test_non_finite_numbers_become_text() {
        assert_eq!(CellValue::Number(f64::NAN).as_finite_number(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_text(), "NaN");
        assert_eq!(CellValue::Number(f64::INFINITY).as_text(), "Infinity");
        assert_eq!(CellValue::Number(f64::NEG_INFINITY).as_text(), "-Infinity");
    }

    #[test]
    fn test_sheet_builder() {
        let sheet = Sheet::new("Data", ["A", "B"])
            .with_row([CellValue::from(1), CellValue::from("x")])
            .with_row([CellValue::from(2), CellValue::from("y")]);

        assert_eq!(sheet.headers, vec!["A", "B"]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.rows[1][1], CellValue::Text("y".to_string()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_untagged_cell_json() {
        let row: Vec<CellValue> = serde_json::from_str(r#"[1, "x"]"#).unwrap();
        assert_eq!(
            row,
            vec![CellValue::Number(1.0), CellValue::Text("x".to_string())]
        );
    }
}
