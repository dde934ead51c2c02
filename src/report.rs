//! Project report layout: the three sheets of the sales report export
//!
//! Rows arrive already filtered and formatted; this module only fixes sheet
//! names, column order and the download file name.

use crate::config::EncodeOptions;
use crate::encoder::encode_workbook_with;
use crate::error::Result;
use crate::types::{CellValue, Sheet};
use chrono::NaiveDateTime;

pub const PROJECTS_SHEET: &str = "Proyectos";
pub const NEGOTIATIONS_SHEET: &str = "Negociaciones";
pub const LOGS_SHEET: &str = "Logs";

const PROJECT_HEADERS: [&str; 6] = [
    "Proyecto",
    "Cliente",
    "Vendedor",
    "Tipo de proyecto",
    "Estado",
    "Valor estimado",
];
const NEGOTIATION_HEADERS: [&str; 4] = ["ID", "Proyecto", "Cliente", "Fecha de creacion"];
const LOG_HEADERS: [&str; 6] = [
    "ID negociacion",
    "Proyecto",
    "Cliente",
    "Vendedor",
    "Fecha",
    "Descripcion",
];

/// One project line
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRow {
    pub name: String,
    pub client: String,
    pub seller: String,
    pub project_type: String,
    pub status: String,
    /// Already formatted by the caller (number or label)
    pub estimated_value: CellValue,
}

/// One negotiation line
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationRow {
    pub id: CellValue,
    pub project: String,
    pub client: String,
    pub created_at: String,
}

/// One negotiation log entry
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationLogRow {
    pub negotiation_id: CellValue,
    pub project: String,
    pub client: String,
    pub seller: String,
    pub date: String,
    pub description: String,
}

/// Rows for the three report sheets
#[derive(Debug, Clone, Default)]
pub struct ProjectReport {
    pub projects: Vec<ProjectRow>,
    pub negotiations: Vec<NegotiationRow>,
    pub logs: Vec<NegotiationLogRow>,
}

impl ProjectReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.negotiations.is_empty() && self.logs.is_empty()
    }

    /// The report as sheets: projects, negotiations, logs. Empty sections
    /// still yield a header-only sheet.
    pub fn sheets(&self) -> Vec<Sheet> {
        let mut projects = Sheet::new(PROJECTS_SHEET, PROJECT_HEADERS);
        for p in &self.projects {
            projects.push_row([
                CellValue::from(p.name.as_str()),
                CellValue::from(p.client.as_str()),
                CellValue::from(p.seller.as_str()),
                CellValue::from(p.project_type.as_str()),
                CellValue::from(p.status.as_str()),
                p.estimated_value.clone(),
            ]);
        }

        let mut negotiations = Sheet::new(NEGOTIATIONS_SHEET, NEGOTIATION_HEADERS);
        for n in &self.negotiations {
            negotiations.push_row([
                n.id.clone(),
                CellValue::from(n.project.as_str()),
                CellValue::from(n.client.as_str()),
                CellValue::from(n.created_at.as_str()),
            ]);
        }

        let mut logs = Sheet::new(LOGS_SHEET, LOG_HEADERS);
        for l in &self.logs {
            logs.push_row([
                l.negotiation_id.clone(),
                CellValue::from(l.project.as_str()),
                CellValue::from(l.client.as_str()),
                CellValue::from(l.seller.as_str()),
                CellValue::from(l.date.as_str()),
                CellValue::from(l.description.as_str()),
            ]);
        }

        vec![projects, negotiations, logs]
    }

    /// Encode the report as an `.xlsx` buffer
    pub fn encode(&self, options: &EncodeOptions) -> Result<Vec<u8>> {
        encode_workbook_with(&self.sheets(), options)
    }
}

/// Download name for a report generated at `at`: `reporte_proyectos_yyyyMMdd_HHmm.xlsx`
pub fn report_file_name(at: &NaiveDateTime) -> String {
    format!("reporte_proyectos_{}.xlsx", at.format("%Y%m%d_%H%M"))
}
