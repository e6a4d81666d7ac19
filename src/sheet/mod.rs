// src/sheet/mod.rs
pub mod cell;
pub mod worksheet;

pub use cell::CellValue;
pub use worksheet::{open_active_sheet, Worksheet};
