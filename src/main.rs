// src/main.rs
mod batch;
mod extractors;
mod records;
mod sheet;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use batch::BatchOptions;
use extractors::{SectionCatalog, SectionExtractor};
use records::{union_keys, FlatLayout, NestedLayout};
use storage::{OutputFormat, StorageManager};
use utils::AppError;

/// Converts a directory of payslip spreadsheets into one CSV or JSON file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing .xlsx payslips
    #[arg(short, long, default_value = ".")]
    input_dir: PathBuf,

    /// Output file name; the format's extension is appended
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Suppress per-file progress messages
    #[arg(short, long)]
    quiet: bool,

    /// Skip documents that cannot be opened instead of aborting
    #[arg(long)]
    skip_invalid: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.quiet);
    tracing::debug!("Starting with args: {:?}", args);

    if !args.input_dir.is_dir() {
        return Err(AppError::Config(format!(
            "Input directory {} does not exist or is not a directory",
            args.input_dir.display()
        )));
    }

    // 3. Initialize storage and extractor
    let storage = StorageManager::new(&args.output)?;
    let extractor = SectionExtractor::new(SectionCatalog::payslip());
    let options = BatchOptions {
        skip_invalid: args.skip_invalid,
    };

    // 4. Parse, sort and write
    let path = match args.format {
        OutputFormat::Csv => {
            let records = batch::aggregate(&args.input_dir, &extractor, &FlatLayout, options)?;
            let columns = union_keys(&records);
            tracing::debug!("CSV header has {} columns", columns.len());
            storage.save_csv(&columns, &records)?
        }
        OutputFormat::Json => {
            let records = batch::aggregate(&args.input_dir, &extractor, &NestedLayout, options)?;
            storage.save_json(&records)?
        }
    };

    tracing::info!("Processing finished. Output written to {}", path.display());
    Ok(())
}
