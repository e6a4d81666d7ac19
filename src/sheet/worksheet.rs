// src/sheet/worksheet.rs
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};

use crate::sheet::cell::CellValue;
use crate::utils::error::LoadError;

/// Random access to one sheet's cells, addressed with 1-based (row, column)
/// indices like the spreadsheet UI.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    range: Range<Data>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, range: Range<Data>) -> Self {
        Self { name: name.into(), range }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the cell at `(row, col)`. Anything outside the used range is blank.
    pub fn cell(&self, row: u32, col: u32) -> CellValue {
        if row == 0 || col == 0 {
            return CellValue::Blank;
        }
        self.range
            .get_value((row - 1, col - 1))
            .map(CellValue::from)
            .unwrap_or(CellValue::Blank)
    }

    /// 1-based index of the last used row, or 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.range.end().map(|(row, _)| row + 1).unwrap_or(0)
    }

    /// Non-blank cells of column `col`, top to bottom, with their row index.
    pub fn column_cells(&self, col: u32) -> impl Iterator<Item = (u32, CellValue)> + '_ {
        (1..=self.max_row())
            .map(move |row| (row, self.cell(row, col)))
            .filter(|(_, value)| !value.is_blank())
    }
}

/// Opens the workbook at `path` and loads its first sheet, which is the active
/// sheet of an exported payslip. The workbook handle is released on return.
pub fn open_active_sheet(path: &Path) -> Result<Worksheet, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::NoActiveSheet(path.to_path_buf()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoActiveSheet(path.to_path_buf()))?
        .map_err(|source| LoadError::Sheet {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Loaded sheet '{}' from {} ({} rows)", name, path.display(), range.height());
    Ok(Worksheet::new(name, range))
}
