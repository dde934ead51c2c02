//! OOXML package assembly: fixed parts plus one worksheet part per sheet

use indexmap::{IndexMap, IndexSet};

use super::worksheet::{render_worksheet, sanitize_sheet_name};
use super::xml_writer::XmlWriter;
use crate::error::{ExcelError, Result};
use crate::types::{ArchivePart, Sheet};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

const CT_WORKSHEET: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";

pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub const ROOT_RELS_PATH: &str = "_rels/.rels";
pub const WORKBOOK_PATH: &str = "xl/workbook.xml";
pub const WORKBOOK_RELS_PATH: &str = "xl/_rels/workbook.xml.rels";
pub const STYLES_PATH: &str = "xl/styles.xml";

/// Archive path of the 1-based worksheet `n`
pub fn worksheet_path(n: usize) -> String {
    format!("xl/worksheets/sheet{n}.xml")
}

/// All parts of a workbook, in archive order
#[derive(Debug, Default)]
pub struct Package {
    parts: IndexMap<String, Vec<u8>>,
}

impl Package {
    fn insert(&mut self, path: impl Into<String>, content: Vec<u8>) {
        self.parts.insert(path.into(), content);
    }

    /// Content of the part at `path`
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(Vec::as_slice)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    pub fn into_parts(self) -> Vec<ArchivePart> {
        self.parts
            .into_iter()
            .map(|(path, content)| ArchivePart { path, content })
            .collect()
    }
}

/// Reject workbooks that would produce an invalid file
pub fn validate_sheets(sheets: &[Sheet]) -> Result<()> {
    if sheets.is_empty() {
        return Err(ExcelError::EmptyWorkbook);
    }
    for sheet in sheets {
        let expected = sheet.headers.len();
        if let Some((row, cells)) = sheet
            .rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(ExcelError::RowWidthMismatch {
                sheet: sheet.name.clone(),
                row,
                expected,
                found: cells.len(),
            });
        }
    }
    Ok(())
}

/// Sanitized, unique display names in sheet order
///
/// A name that sanitizes to nothing becomes `SheetN`, moving to the next free
/// number when another sheet already uses that name. Names must stay unique
/// ignoring case, as spreadsheet readers compare them that way.
pub fn resolve_sheet_names(sheets: &[Sheet]) -> Result<Vec<String>> {
    let sanitized: Vec<String> = sheets.iter().map(|s| sanitize_sheet_name(&s.name)).collect();

    let mut seen = IndexSet::with_capacity(sheets.len());
    for name in sanitized.iter().filter(|n| !n.is_empty()) {
        if !seen.insert(name.to_lowercase()) {
            return Err(ExcelError::DuplicateSheetName(name.clone()));
        }
    }

    let mut names = Vec::with_capacity(sheets.len());
    for (i, (sheet, mut name)) in sheets.iter().zip(sanitized).enumerate() {
        if name.is_empty() {
            let mut n = i + 1;
            name = loop {
                let candidate = format!("Sheet{n}");
                if seen.insert(candidate.to_lowercase()) {
                    break candidate;
                }
                n += 1;
            };
        }
        if name != sheet.name {
            log::warn!("sheet name '{}' written as '{}'", sheet.name, name);
        }
        names.push(name);
    }
    Ok(names)
}

/// Build every part of the workbook package
pub fn assemble_package(sheets: &[Sheet]) -> Result<Package> {
    validate_sheets(sheets)?;
    let names = resolve_sheet_names(sheets)?;

    let mut package = Package::default();
    package.insert(CONTENT_TYPES_PATH, content_types_xml(sheets.len()));
    package.insert(ROOT_RELS_PATH, root_rels_xml());
    package.insert(WORKBOOK_PATH, workbook_xml(&names));
    package.insert(WORKBOOK_RELS_PATH, workbook_rels_xml(sheets.len()));
    package.insert(STYLES_PATH, STYLES_XML.as_bytes().to_vec());
    for (i, sheet) in sheets.iter().enumerate() {
        package.insert(worksheet_path(i + 1), render_worksheet(sheet));
    }
    Ok(package)
}

fn content_types_xml(sheet_count: usize) -> Vec<u8> {
    let mut xml = XmlWriter::document();
    xml.start_element("Types");
    xml.attribute("xmlns", NS_CONTENT_TYPES);
    xml.close_start_tag();

    xml.write_str(
        "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
<Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>",
    );
    for n in 1..=sheet_count {
        xml.start_element("Override");
        xml.attribute("PartName", &format!("/{}", worksheet_path(n)));
        xml.attribute("ContentType", CT_WORKSHEET);
        xml.close_empty();
    }

    xml.end_element("Types");
    xml.into_bytes()
}

fn root_rels_xml() -> Vec<u8> {
    let mut xml = XmlWriter::document();
    xml.start_element("Relationships");
    xml.attribute("xmlns", NS_PKG_REL);
    xml.close_start_tag();
    xml.write_str(
        "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/>",
    );
    xml.end_element("Relationships");
    xml.into_bytes()
}

fn workbook_xml(names: &[String]) -> Vec<u8> {
    let mut xml = XmlWriter::document();
    xml.start_element("workbook");
    xml.attribute("xmlns", NS_MAIN);
    xml.attribute("xmlns:r", NS_REL);
    xml.close_start_tag();

    xml.start_element("sheets");
    xml.close_start_tag();
    for (i, name) in names.iter().enumerate() {
        let sheet_id = i + 1;
        xml.start_element("sheet");
        xml.attribute("name", name);
        xml.attribute_int("sheetId", sheet_id);
        xml.attribute("r:id", &format!("rId{sheet_id}"));
        xml.close_empty();
    }
    xml.end_element("sheets");

    xml.end_element("workbook");
    xml.into_bytes()
}

fn workbook_rels_xml(sheet_count: usize) -> Vec<u8> {
    let mut xml = XmlWriter::document();
    xml.start_element("Relationships");
    xml.attribute("xmlns", NS_PKG_REL);
    xml.close_start_tag();

    for n in 1..=sheet_count {
        xml.start_element("Relationship");
        xml.attribute("Id", &format!("rId{n}"));
        xml.attribute("Type", REL_WORKSHEET);
        xml.attribute("Target", &format!("worksheets/sheet{n}.xml"));
        xml.close_empty();
    }

    // Styles take the id right after the last worksheet
    xml.start_element("Relationship");
    xml.attribute("Id", &format!("rId{}", sheet_count + 1));
    xml.attribute("Type", REL_STYLES);
    xml.attribute("Target", "styles.xml");
    xml.close_empty();

    xml.end_element("Relationships");
    xml.into_bytes()
}

/// Default font plus bold font; cellXfs 0 is the default format, 1 is bold
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="2">
<font><sz val="11"/><name val="Calibri"/><family val="2"/></font>
<font><b/><sz val="11"/><name val="Calibri"/><family val="2"/></font>
</fonts>
<fills count="2">
<fill><patternFill patternType="none"/></fill>
<fill><patternFill patternType="gray125"/></fill>
</fills>
<borders count="1">
<border><left/><right/><top/><bottom/><diagonal/></border>
</borders>
<cellStyleXfs count="1">
<xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
</cellStyleXfs>
<cellXfs count="2">
<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
<xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>
</cellXfs>
<cellStyles count="1">
<cellStyle name="Normal" xfId="0" builtinId="0"/>
</cellStyles>
</styleSheet>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn text(package: &Package, path: &str) -> String {
        String::from_utf8(package.get(path).unwrap().to_vec()).unwrap()
    }

    fn three_sheets() -> Vec<Sheet> {
        vec![
            Sheet::new("Proyectos", ["Proyecto"]).with_row(["Alpha"]),
            Sheet::new("Negociaciones", ["ID"]).with_row([CellValue::from(7)]),
            Sheet::new("Logs", ["Fecha"]),
        ]
    }

    #[test]
    fn test_part_order() {
        let package = assemble_package(&three_sheets()).unwrap();
        let paths: Vec<&str> = package.paths().collect();
        assert_eq!(
            paths,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "xl/workbook.xml",
                "xl/_rels/workbook.xml.rels",
                "xl/styles.xml",
                "xl/worksheets/sheet1.xml",
                "xl/worksheets/sheet2.xml",
                "xl/worksheets/sheet3.xml",
            ]
        );
    }

    #[test]
    fn test_cross_references() {
        let package = assemble_package(&three_sheets()).unwrap();
        let content_types = text(&package, CONTENT_TYPES_PATH);
        let workbook = text(&package, WORKBOOK_PATH);
        let rels = text(&package, WORKBOOK_RELS_PATH);

        for (n, name) in [(1, "Proyectos"), (2, "Negociaciones"), (3, "Logs")] {
            let part = format!("xl/worksheets/sheet{n}.xml");
            assert!(package.get(&part).is_some());
            assert!(content_types.contains(&format!(
                "<Override PartName=\"/{part}\" ContentType=\"{CT_WORKSHEET}\"/>"
            )));
            assert!(workbook.contains(&format!(
                "<sheet name=\"{name}\" sheetId=\"{n}\" r:id=\"rId{n}\"/>"
            )));
            assert!(rels.contains(&format!(
                "<Relationship Id=\"rId{n}\" Type=\"{REL_WORKSHEET}\" Target=\"worksheets/sheet{n}.xml\"/>"
            )));
        }

        assert!(rels.contains(&format!(
            "<Relationship Id=\"rId4\" Type=\"{REL_STYLES}\" Target=\"styles.xml\"/>"
        )));
        assert_eq!(rels.matches("<Relationship ").count(), 4);
        assert_eq!(workbook.matches("<sheet ").count(), 3);
        assert_eq!(content_types.matches(CT_WORKSHEET).count(), 3);
        assert!(content_types.contains("PartName=\"/xl/workbook.xml\""));
        assert!(content_types.contains("PartName=\"/xl/styles.xml\""));
        assert!(text(&package, ROOT_RELS_PATH).contains("Target=\"xl/workbook.xml\""));
    }

    #[test]
    fn test_styles_part() {
        let package = assemble_package(&three_sheets()).unwrap();
        let styles = text(&package, STYLES_PATH);
        assert!(styles.contains("<fonts count=\"2\">"));
        assert!(styles.contains("<fills count=\"2\">"));
        assert!(styles.contains("<borders count=\"1\">"));
        assert!(styles.contains("<cellXfs count=\"2\">"));
        assert_eq!(styles.matches("<b/>").count(), 1);
    }

    #[test]
    fn test_sheet_names_sanitized_and_escaped() {
        let sheets = vec![Sheet::new("R&D/2024:Q1", ["A"])];
        let package = assemble_package(&sheets).unwrap();
        assert!(text(&package, WORKBOOK_PATH).contains("<sheet name=\"R&amp;D2024Q1\""));
    }

    #[test]
    fn test_empty_name_falls_back() {
        let sheets = vec![Sheet::new("Data", ["A"]), Sheet::new("[??]", ["A"])];
        assert_eq!(resolve_sheet_names(&sheets).unwrap(), vec!["Data", "Sheet2"]);
    }

    #[test]
    fn test_fallback_skips_names_taken_later() {
        let sheets = vec![
            Sheet::new("[?]", ["A"]),
            Sheet::new("Sheet1", ["A"]),
            Sheet::new("sheet2", ["A"]),
        ];
        assert_eq!(
            resolve_sheet_names(&sheets).unwrap(),
            vec!["Sheet3", "Sheet1", "sheet2"]
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let sheets = vec![Sheet::new("Logs", ["A"]), Sheet::new("logs:", ["A"])];
        let err = resolve_sheet_names(&sheets).unwrap_err();
        assert!(matches!(err, ExcelError::DuplicateSheetName(ref n) if n == "logs"));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            assemble_package(&[]).unwrap_err(),
            ExcelError::EmptyWorkbook
        ));

        let ragged = Sheet::new("Data", ["A", "B"])
            .with_row([CellValue::from(1), CellValue::from(2)])
            .with_row([CellValue::from(3)]);
        match assemble_package(&[ragged]).unwrap_err() {
            ExcelError::RowWidthMismatch {
                sheet,
                row,
                expected,
                found,
            } => {
                assert_eq!(sheet, "Data");
                assert_eq!((row, expected, found), (1, 2, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
