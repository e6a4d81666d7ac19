// src/storage/mod.rs
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

use crate::records::{FlatRecord, NestedRecord};
use crate::utils::error::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Serialize)]
struct PayslipDocument<'a> {
    #[serde(rename = "Payslips")]
    payslips: &'a [NestedRecord],
}

pub struct StorageManager {
    base_path: PathBuf,
}

impl StorageManager {
    /// Creates a StorageManager writing next to `base_path` (a file name without
    /// its format extension). Missing parent directories are created.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, StorageError> {
        let base_path = base_path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self { base_path })
    }

    /// The file written for `format`. A base that already ends in the format's
    /// extension is used as is.
    pub fn output_path(&self, format: OutputFormat) -> PathBuf {
        let ext = format.extension();
        if self.base_path.extension().is_some_and(|e| e.eq_ignore_ascii_case(ext)) {
            return self.base_path.clone();
        }
        let mut name = self.base_path.clone().into_os_string();
        name.push(".");
        name.push(ext);
        PathBuf::from(name)
    }

    /// Writes one header row of `columns` and one row per record.
    /// Keys a record lacks become empty cells.
    pub fn save_csv(&self, columns: &[String], records: &[FlatRecord]) -> Result<PathBuf, StorageError> {
        let file_path = self.output_path(OutputFormat::Csv);
        let file = fs::File::create(&file_path)?;
        write_csv(file, columns, records)?;

        tracing::info!("Saved {} rows to {}", records.len(), file_path.display());
        Ok(file_path)
    }

    /// Writes `{"Payslips": [...]}` with two-space indentation.
    pub fn save_json(&self, records: &[NestedRecord]) -> Result<PathBuf, StorageError> {
        let file_path = self.output_path(OutputFormat::Json);
        let file = fs::File::create(&file_path)?;
        write_json(BufWriter::new(file), records)?;

        tracing::info!("Saved {} payslips to {}", records.len(), file_path.display());
        Ok(file_path)
    }
}

pub fn write_csv<W: Write>(out: W, columns: &[String], records: &[FlatRecord]) -> Result<(), StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    writer.write_record(columns)?;
    for record in records {
        writer.write_record(
            columns
                .iter()
                .map(|column| record.get(column).map(ToString::to_string).unwrap_or_default()),
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut out: W, records: &[NestedRecord]) -> Result<(), StorageError> {
    serde_json::to_writer_pretty(&mut out, &PayslipDocument { payslips: records })?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
