// src/batch/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::{Payslip, SectionExtractor};
use crate::records::RecordLayout;
use crate::utils::error::{AppError, DateParseError, LoadError};

/// Only files with this suffix are treated as payslips.
pub const DOCUMENT_SUFFIX: &str = ".xlsx";
// Excel leaves owner files like "~$payslip.xlsx" next to open workbooks.
const LOCK_FILE_PREFIX: &str = "~$";

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Log and skip documents that fail to load instead of aborting the batch.
    pub skip_invalid: bool,
}

/// Lists the payslip documents directly inside `dir`, sorted by file name.
pub fn collect_documents(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut documents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            tracing::debug!("Skipping non-UTF-8 file name {:?}", file_name);
            continue;
        };
        if !name.ends_with(DOCUMENT_SUFFIX) || name.starts_with(LOCK_FILE_PREFIX) {
            continue;
        }
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        documents.push(path);
    }
    documents.sort();
    Ok(documents)
}

/// Parses every document in order. A load failure aborts unless `skip_invalid` is set.
pub fn parse_all(
    extractor: &SectionExtractor,
    documents: &[PathBuf],
    options: BatchOptions,
) -> Result<Vec<Payslip>, LoadError> {
    let mut payslips = Vec::with_capacity(documents.len());
    for path in documents {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        tracing::info!("Parsing {}...", name);
        match extractor.parse_document(path) {
            Ok(payslip) => payslips.push(payslip),
            Err(e) if options.skip_invalid => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(payslips)
}

/// Projects payslips into `layout` records and orders them by Check Date.
/// The sort is stable, so records sharing a date keep their input order.
pub fn assemble<L: RecordLayout>(
    layout: &L,
    payslips: Vec<Payslip>,
) -> Result<Vec<L::Record>, DateParseError> {
    let mut keyed = payslips
        .into_iter()
        .map(|payslip| {
            let source = payslip.source.clone();
            let record = layout.project(payslip);
            let key = layout.sort_key(&record).inspect_err(|e| {
                if let Some(source) = &source {
                    tracing::error!("Bad Check Date in {}: {}", source.display(), e);
                }
            })?;
            Ok((key, record))
        })
        .collect::<Result<Vec<_>, DateParseError>>()?;

    keyed.sort_by_key(|(key, _)| *key);
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

/// Parses every payslip in `dir` and returns the sorted records.
pub fn aggregate<L: RecordLayout>(
    dir: &Path,
    extractor: &SectionExtractor,
    layout: &L,
    options: BatchOptions,
) -> Result<Vec<L::Record>, AppError> {
    let documents = collect_documents(dir)?;
    tracing::info!("Found {} payslip documents in {}", documents.len(), dir.display());

    let payslips = parse_all(extractor, &documents, options)?;
    Ok(assemble(layout, payslips)?)
}
