// src/extractors/mod.rs
pub mod catalog;
pub mod section;
pub mod table;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use {
    catalog::{SectionCatalog, SectionKind},
    section::{Payslip, SectionExtractor},
    table::{Field, GridRow, Section, SectionBody},
};
