//! Write a workbook with several sheets, including awkward names and text
//!
//! Run with: cargo run --example multi_sheet

use excelpack::types::CellValue;
use excelpack::{EncodeOptions, ExcelWriter, Sheet};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = ExcelWriter::with_options(EncodeOptions::from_env()?);

    let mut sales = Sheet::new("Sales/2024:Q1", ["Region", "Units", "Revenue"]);
    sales.push_row([
        CellValue::from("North"),
        CellValue::from(120),
        CellValue::from(15_400.75),
    ]);
    sales.push_row([
        CellValue::from("South & East"),
        CellValue::from(98),
        CellValue::from(12_010.0),
    ]);
    writer.add_sheet(sales);

    let notes = Sheet::new("Notes", ["Note"])
        .with_row(["  indented note"])
        .with_row(["first line\nsecond line"]);
    writer.add_sheet(notes);

    writer.add_sheet(Sheet::new("Empty", ["Nothing here yet"]));

    writer.save("multi_sheet.xlsx")?;
    println!("Wrote multi_sheet.xlsx with {} sheets", writer.sheet_count());
    Ok(())
}
