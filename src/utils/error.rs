// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// A document could not be opened, or it has no worksheet to read.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("Workbook {0} has no active sheet")]
    NoActiveSheet(PathBuf),

    #[error("Failed to read sheet of workbook {path}: {source}")]
    Sheet {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },
}

/// The Check Date of a record is present but not a `month/day/year` date.
#[derive(Error, Debug)]
pub enum DateParseError {
    #[error("Check Date '{value}' is not in month/day/year format: {source}")]
    Format {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Check Date cell holds a non-date value: {0}")]
    Unsupported(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Load failed: {0}")]
    Load(#[from] LoadError),

    #[error("Sorting failed: {0}")]
    Date(#[from] DateParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
