//! Build the project report workbook and save it under its download name
//!
//! Run with: cargo run --example project_report

use chrono::Local;
use excelpack::report::{
    report_file_name, NegotiationLogRow, NegotiationRow, ProjectReport, ProjectRow,
};
use excelpack::types::CellValue;
use excelpack::{EncodeOptions, XLSX_MIME_TYPE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let report = ProjectReport {
        projects: vec![ProjectRow {
            name: "Torre Norte".to_string(),
            client: "Constructora Andes".to_string(),
            seller: "Laura Gómez".to_string(),
            project_type: "Residencial".to_string(),
            status: "En negociación".to_string(),
            estimated_value: CellValue::from(1_250_000),
        }],
        negotiations: vec![NegotiationRow {
            id: CellValue::from(17),
            project: "Torre Norte".to_string(),
            client: "Constructora Andes".to_string(),
            created_at: "03/02/2024".to_string(),
        }],
        logs: vec![NegotiationLogRow {
            negotiation_id: CellValue::from(17),
            project: "Torre Norte".to_string(),
            client: "Constructora Andes".to_string(),
            seller: "Laura Gómez".to_string(),
            date: "05/02/2024".to_string(),
            description: "Primera reunión con el cliente".to_string(),
        }],
    };

    let now = Local::now().naive_local();
    let options = EncodeOptions::new().with_modified(now);
    let bytes = report.encode(&options)?;

    let file_name = report_file_name(&now);
    std::fs::write(&file_name, &bytes)?;
    println!("Wrote {} ({} bytes, {})", file_name, bytes.len(), XLSX_MIME_TYPE);
    Ok(())
}
