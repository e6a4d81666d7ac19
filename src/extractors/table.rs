// src/extractors/table.rs
//! Positional table decoders. Neither decoder knows about output formats: both
//! produce a [`Section`] tree that the record layouts project afterwards.

use crate::extractors::catalog::SectionCatalog;
use crate::sheet::{CellValue, Worksheet};

const TITLE_COL: u32 = 1;
const FIRST_GRID_VALUE_COL: u32 = 2;

/// One labeled value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: String,
    pub value: CellValue,
}

/// One data row of a grid: its leading label plus one field per header column.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub label: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Fields(Vec<Field>),
    Rows(Vec<GridRow>),
}

/// A decoded section: its title and whatever the table under it held.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub body: SectionBody,
}

/// Decodes a single-row table whose title sits at `(start_row, 1)`.
///
/// Labels are read from `start_row + 1` starting at column 1, values from the
/// cell directly below each label. The scan stops at the first blank label;
/// blank values are kept.
pub fn decode_single_row(sheet: &Worksheet, start_row: u32) -> Section {
    let title = sheet.cell(start_row, TITLE_COL).to_string();
    let label_row = start_row + 1;
    let data_row = start_row + 2;

    let mut fields = Vec::new();
    let mut col = 1;
    loop {
        let label = sheet.cell(label_row, col);
        if label.is_blank() {
            break;
        }
        fields.push(Field {
            label: label.to_string(),
            value: sheet.cell(data_row, col),
        });
        col += 1;
    }

    tracing::trace!("Single-row section '{}' at row {}: {} fields", title, start_row, fields.len());
    Section {
        title,
        body: SectionBody::Fields(fields),
    }
}

/// Decodes a grid whose title sits at `(start_row, 1)`.
///
/// Column headers run along `start_row + 1` from column 2 until the first blank
/// header. Data rows start at `start_row + 2` and continue until a row label
/// names a known section or the sheet ends. A blank row label does not end
/// the grid.
pub fn decode_grid(sheet: &Worksheet, start_row: u32, catalog: &SectionCatalog) -> Section {
    let title = sheet.cell(start_row, TITLE_COL).to_string();
    let header_row = start_row + 1;
    let max_row = sheet.max_row();

    let mut headers = Vec::new();
    let mut col = FIRST_GRID_VALUE_COL;
    loop {
        let header = sheet.cell(header_row, col);
        if header.is_blank() {
            break;
        }
        headers.push((col, header.to_string()));
        col += 1;
    }

    let mut rows = Vec::new();
    let mut data_row = start_row + 2;
    while data_row <= max_row {
        let row_label = sheet.cell(data_row, TITLE_COL);
        if row_label.as_text().is_some_and(|text| catalog.is_title(text)) {
            break;
        }

        let fields = headers
            .iter()
            .map(|(col, header)| Field {
                label: header.clone(),
                value: sheet.cell(data_row, *col),
            })
            .collect();
        rows.push(GridRow {
            label: row_label.to_string(),
            fields,
        });
        data_row += 1;
    }

    tracing::trace!(
        "Grid section '{}' at row {}: {} rows x {} columns",
        title,
        start_row,
        rows.len(),
        headers.len()
    );
    Section {
        title,
        body: SectionBody::Rows(rows),
    }
}
