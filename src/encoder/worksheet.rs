//! Worksheet rendering: cell references, inline-string cells and `<sheetData>`

use super::xml_writer::{push_escaped, XML_DECLARATION};
use crate::types::{CellValue, Sheet};

/// Longest sheet name the format accepts, in UTF-16 code units
pub const MAX_SHEET_NAME_UNITS: usize = 31;

/// Characters that may not appear in a sheet name
const ILLEGAL_SHEET_NAME_CHARS: [char; 7] = ['\\', '/', '*', '?', ':', '[', ']'];

/// Style index of the bold header format in `styles.xml`
pub const HEADER_STYLE: u32 = 1;

/// Largest magnitude at which every integer is exactly representable in an f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Convert a 0-based column index to letters (0 -> A, 25 -> Z, 26 -> AA)
pub fn column_name(index: usize) -> String {
    let mut buf = Vec::with_capacity(3);
    push_column_name(&mut buf, index);
    // Only ASCII uppercase letters are pushed
    buf.into_iter().map(char::from).collect()
}

/// Append the column letters for `index` to `out`
pub fn push_column_name(out: &mut Vec<u8>, index: usize) {
    let start = out.len();
    let mut n = index;
    loop {
        out.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out[start..].reverse();
}

/// Make a name acceptable as a sheet name: drop illegal characters, trim,
/// and cut to 31 UTF-16 units without splitting a surrogate pair
pub fn sanitize_sheet_name(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !ILLEGAL_SHEET_NAME_CHARS.contains(c))
        .collect();

    let mut out = String::with_capacity(stripped.len().min(4 * MAX_SHEET_NAME_UNITS));
    let mut units = 0;
    for ch in stripped.trim().chars() {
        units += ch.len_utf16();
        if units > MAX_SHEET_NAME_UNITS {
            break;
        }
        out.push(ch);
    }
    out
}

/// Whether text needs `xml:space="preserve"` to survive readers that collapse whitespace
fn needs_space_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.contains('\n')
}

fn push_number(out: &mut Vec<u8>, value: f64) {
    if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        let mut num = itoa::Buffer::new();
        out.extend_from_slice(num.format(value as i64).as_bytes());
    } else {
        out.extend_from_slice(value.to_string().as_bytes());
    }
}

/// Write `<c r="REF"` plus the optional style attribute
fn open_cell(out: &mut Vec<u8>, col: &[u8], row: &str, style: Option<u32>) {
    out.extend_from_slice(b"<c r=\"");
    out.extend_from_slice(col);
    out.extend_from_slice(row.as_bytes());
    out.push(b'"');
    if let Some(style) = style {
        let mut num = itoa::Buffer::new();
        out.extend_from_slice(b" s=\"");
        out.extend_from_slice(num.format(style).as_bytes());
        out.push(b'"');
    }
}

fn push_text_cell(out: &mut Vec<u8>, col: &[u8], row: &str, text: &str, style: Option<u32>) {
    open_cell(out, col, row, style);
    out.extend_from_slice(b" t=\"inlineStr\"><is><t");
    if needs_space_preserve(text) {
        out.extend_from_slice(b" xml:space=\"preserve\"");
    }
    out.push(b'>');
    push_escaped(out, text);
    out.extend_from_slice(b"</t></is></c>");
}

fn push_cell(out: &mut Vec<u8>, col: &[u8], row: &str, value: &CellValue, style: Option<u32>) {
    match value {
        CellValue::Text(text) => push_text_cell(out, col, row, text, style),
        CellValue::Number(n) if n.is_finite() => {
            open_cell(out, col, row, style);
            out.extend_from_slice(b"><v>");
            push_number(out, *n);
            out.extend_from_slice(b"</v></c>");
        }
        other => push_text_cell(out, col, row, &other.as_text(), style),
    }
}

/// Render one `<c>` element at `(col, row)`; `row` is 1-based
pub fn render_cell(col: usize, row: usize, value: &CellValue, is_header: bool) -> String {
    let mut col_buf = Vec::with_capacity(3);
    push_column_name(&mut col_buf, col);
    let mut num = itoa::Buffer::new();
    let style = is_header.then_some(HEADER_STYLE);

    let mut out = Vec::with_capacity(64);
    push_cell(&mut out, &col_buf, num.format(row), value, style);
    String::from_utf8_lossy(&out).into_owned()
}

/// Render a full worksheet part: bold headers on row 1, data from row 2
pub fn render_worksheet(sheet: &Sheet) -> Vec<u8> {
    let width = sheet
        .rows
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(sheet.headers.len());

    // Column letters are the same for every row, build them once
    let columns: Vec<Vec<u8>> = (0..width)
        .map(|i| {
            let mut col = Vec::with_capacity(3);
            push_column_name(&mut col, i);
            col
        })
        .collect();

    let mut out = Vec::with_capacity(256 + (sheet.rows.len() + 1) * width.max(1) * 48);
    out.extend_from_slice(XML_DECLARATION.as_bytes());
    out.extend_from_slice(
        b"<worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\"><sheetData>",
    );

    out.extend_from_slice(b"<row r=\"1\">");
    for (header, col) in sheet.headers.iter().zip(&columns) {
        push_text_cell(&mut out, col, "1", header, Some(HEADER_STYLE));
    }
    out.extend_from_slice(b"</row>");

    let mut num = itoa::Buffer::new();
    for (i, row) in sheet.rows.iter().enumerate() {
        let row_ref = num.format(i + 2);
        out.extend_from_slice(b"<row r=\"");
        out.extend_from_slice(row_ref.as_bytes());
        out.extend_from_slice(b"\">");
        for (value, col) in row.iter().zip(&columns) {
            push_cell(&mut out, col, row_ref, value, None);
        }
        out.extend_from_slice(b"</row>");
    }

    out.extend_from_slice(b"</sheetData></worksheet>");
    out
}
