// src/extractors/section.rs

// --- Imports ---
use std::path::{Path, PathBuf};

use crate::extractors::catalog::{SectionCatalog, SectionKind};
use crate::extractors::table::{decode_grid, decode_single_row, Section};
use crate::sheet::{open_active_sheet, Worksheet};
use crate::utils::error::LoadError;

// --- Data Structures ---
/// Everything decoded from one payslip document, in worksheet order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Payslip {
    pub source: Option<PathBuf>,
    pub sections: Vec<Section>,
}

impl Payslip {
    /// Adds a section. A title seen before replaces the earlier section in place.
    pub fn insert(&mut self, section: Section) {
        match self.sections.iter_mut().find(|existing| existing.title == section.title) {
            Some(existing) => {
                tracing::debug!("Section '{}' repeated; keeping the later one", section.title);
                *existing = section;
            }
            None => self.sections.push(section),
        }
    }
}

// --- Main Extractor Structure ---
/// Walks column A of a worksheet and decodes every recognized section.
pub struct SectionExtractor {
    catalog: SectionCatalog,
}

impl SectionExtractor {
    pub fn new(catalog: SectionCatalog) -> Self {
        tracing::debug!("Section extractor using {} known sections", catalog.section_count());
        Self { catalog }
    }

    /// Decodes the sections of `sheet` in row order. Text in column A that is
    /// not a known title is skipped.
    pub fn extract(&self, sheet: &Worksheet) -> Payslip {
        let mut payslip = Payslip::default();

        for (row, value) in sheet.column_cells(1) {
            let Some(kind) = value.as_text().and_then(|text| self.catalog.kind_of(text)) else {
                continue;
            };
            tracing::debug!("Found section '{}' ({:?}) at row {} of '{}'", value, kind, row, sheet.name());

            let section = match kind {
                SectionKind::SingleRow => decode_single_row(sheet, row),
                SectionKind::Grid => decode_grid(sheet, row, &self.catalog),
            };
            payslip.insert(section);
        }

        payslip
    }

    /// Opens the document at `path` and decodes its active sheet.
    pub fn parse_document(&self, path: &Path) -> Result<Payslip, LoadError> {
        let sheet = open_active_sheet(path)?;
        let mut payslip = self.extract(&sheet);
        payslip.source = Some(path.to_path_buf());
        tracing::debug!("Parsed {} sections from {}", payslip.sections.len(), path.display());
        Ok(payslip)
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new(SectionCatalog::payslip())
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::table::{Field, GridRow, SectionBody};
    use crate::sheet::worksheet::tests::{sheet_from_rows, text};
    use crate::sheet::CellValue;
    use calamine::Data;

    fn field(label: &str, value: CellValue) -> Field {
        Field { label: label.to_string(), value }
    }

    #[test]
    fn test_extracts_sections_in_row_order() {
        let sheet = sheet_from_rows(vec![
            vec![text("Company Information")],
            vec![text("Name")],
            vec![text("Acme")],
            vec![text("Earnings")],
            vec![text("Type"), text("Hours"), text("Rate"), text("Amount")],
            vec![text("Regular"), Data::Float(40.0), Data::Float(20.0), Data::Float(800.0)],
        ]);

        let payslip = SectionExtractor::default().extract(&sheet);
        assert_eq!(
            payslip.sections,
            vec![
                Section {
                    title: "Company Information".to_string(),
                    body: SectionBody::Fields(vec![field("Name", CellValue::Text("Acme".to_string()))]),
                },
                Section {
                    title: "Earnings".to_string(),
                    body: SectionBody::Rows(vec![GridRow {
                        label: "Regular".to_string(),
                        fields: vec![
                            field("Hours", CellValue::Float(40.0)),
                            field("Rate", CellValue::Float(20.0)),
                            field("Amount", CellValue::Float(800.0)),
                        ],
                    }]),
                },
            ]
        );
    }

    #[test]
    fn test_unknown_titles_are_skipped() {
        let sheet = sheet_from_rows(vec![
            vec![text("Printed on 3/2/2024")],
            vec![Data::Float(12.0)],
            vec![text("Payment Information")],
            vec![text("Bank"), text("Amount")],
            vec![text("First Bank"), Data::Float(1200.0)],
        ]);

        let payslip = SectionExtractor::default().extract(&sheet);
        assert_eq!(payslip.sections.len(), 1);
        assert_eq!(payslip.sections[0].title, "Payment Information");
    }

    #[test]
    fn test_repeated_title_last_write_wins() {
        let sheet = sheet_from_rows(vec![
            vec![text("Company Information")],
            vec![text("Name")],
            vec![text("Old Name")],
            vec![text("Payslip Information")],
            vec![text("Check Date")],
            vec![text("1/15/2023")],
            vec![text("Company Information")],
            vec![text("Name")],
            vec![text("New Name")],
        ]);

        let payslip = SectionExtractor::default().extract(&sheet);
        assert_eq!(payslip.sections.len(), 2);
        assert_eq!(payslip.sections[0].title, "Company Information");
        assert_eq!(
            payslip.sections[0].body,
            SectionBody::Fields(vec![field("Name", CellValue::Text("New Name".to_string()))])
        );
        assert_eq!(payslip.sections[1].title, "Payslip Information");
    }

    #[test]
    fn test_parse_document_reads_saved_workbook() {
        use crate::sheet::worksheet::tests::write_payslip_workbook;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acme.xlsx");
        write_payslip_workbook(&path, "Acme", Some("3/1/2024"));

        let payslip = SectionExtractor::default().parse_document(&path).unwrap();
        assert_eq!(payslip.source.as_deref(), Some(path.as_path()));
        let titles: Vec<_> = payslip.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Company Information", "Payslip Information", "Earnings"]);
        assert_eq!(
            payslip.sections[1].body,
            SectionBody::Fields(vec![field("Check Date", CellValue::Text("3/1/2024".to_string()))])
        );
        assert_eq!(
            payslip.sections[2].body,
            SectionBody::Rows(vec![GridRow {
                label: "Regular".to_string(),
                fields: vec![
                    field("Hours", CellValue::Float(40.0)),
                    field("Rate", CellValue::Float(20.0)),
                    field("Amount", CellValue::Float(800.0)),
                ],
            }])
        );
    }

    #[test]
    fn test_empty_sheet_yields_empty_payslip() {
        let sheet = sheet_from_rows(Vec::new());
        assert!(SectionExtractor::default().extract(&sheet).sections.is_empty());
    }
}
