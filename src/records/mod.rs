// src/records/mod.rs
//! Output-shaped records. A [`Payslip`] is decoded once and then projected
//! into either the flat (CSV) or the nested (JSON) layout.
pub mod flat;
pub mod nested;

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::extractors::Payslip;
use crate::sheet::CellValue;
use crate::utils::error::DateParseError;

#[allow(unused_imports)]
pub use {
    flat::{union_keys, FlatLayout, FlatRecord},
    nested::{NestedLayout, NestedRecord, NestedSection},
};

pub const CHECK_DATE_SECTION: &str = "Payslip Information";
pub const CHECK_DATE_LABEL: &str = "Check Date";
const CHECK_DATE_FORMAT: &str = "%m/%d/%Y";

/// One way of shaping a decoded payslip for output.
pub trait RecordLayout {
    type Record;

    fn project(&self, payslip: Payslip) -> Self::Record;

    /// The date records are ordered by.
    fn sort_key(&self, record: &Self::Record) -> Result<NaiveDate, DateParseError>;
}

/// Sort date for records without a Check Date; sorts before any real date.
pub fn missing_check_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Interprets a Check Date cell. Absent or blank cells get [`missing_check_date`].
pub fn parse_check_date(value: Option<&CellValue>) -> Result<NaiveDate, DateParseError> {
    match value {
        None | Some(CellValue::Blank) => Ok(missing_check_date()),
        Some(CellValue::Text(text)) => {
            NaiveDate::parse_from_str(text.trim(), CHECK_DATE_FORMAT).map_err(|source| {
                DateParseError::Format {
                    value: text.clone(),
                    source,
                }
            })
        }
        Some(CellValue::Date(dt)) => Ok(dt.date()),
        Some(other) => Err(DateParseError::Unsupported(other.to_string())),
    }
}

/// Insertion-ordered label → value map. Re-inserting a label overwrites the
/// value but keeps the label's original position.
/// A `Vec` keeps that order; lookups are linear, which is fine for a
/// payslip's few dozen fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMap {
    entries: Vec<(String, CellValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: CellValue) {
        let label = label.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), value))
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in self.iter() {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
