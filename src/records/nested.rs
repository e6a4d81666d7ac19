// src/records/nested.rs
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::extractors::{Payslip, SectionBody};
use crate::records::{parse_check_date, FieldMap, RecordLayout, CHECK_DATE_LABEL, CHECK_DATE_SECTION};
use crate::sheet::CellValue;
use crate::utils::error::DateParseError;

/// Label of the synthetic field holding a grid row's leading label.
pub const ROW_LABEL_FIELD: &str = "Description";

/// A section as it appears in JSON output.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum NestedSection {
    /// Single-row section: label → value.
    Fields(FieldMap),
    /// Grid section: one object per data row, `Description` first.
    Rows(Vec<FieldMap>),
}

/// Section title → section, in worksheet order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NestedRecord {
    sections: Vec<(String, NestedSection)>,
}

impl NestedRecord {
    pub fn section(&self, title: &str) -> Option<&NestedSection> {
        self.sections
            .iter()
            .find(|(existing, _)| existing == title)
            .map(|(_, section)| section)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NestedSection)> {
        self.sections.iter().map(|(title, section)| (title.as_str(), section))
    }
}

impl Serialize for NestedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (title, section) in self.iter() {
            map.serialize_entry(title, section)?;
        }
        map.end()
    }
}

/// Keeps sections as objects and grids as arrays of row objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedLayout;

impl RecordLayout for NestedLayout {
    type Record = NestedRecord;

    fn project(&self, payslip: Payslip) -> NestedRecord {
        let sections = payslip
            .sections
            .into_iter()
            .map(|section| {
                let nested = match section.body {
                    SectionBody::Fields(fields) => {
                        let mut map = FieldMap::new();
                        for field in fields {
                            map.insert(field.label, field.value);
                        }
                        NestedSection::Fields(map)
                    }
                    SectionBody::Rows(rows) => NestedSection::Rows(
                        rows.into_iter()
                            .map(|row| {
                                let mut object = FieldMap::new();
                                object.insert(ROW_LABEL_FIELD, CellValue::Text(row.label));
                                for field in row.fields {
                                    object.insert(field.label, field.value);
                                }
                                object
                            })
                            .collect(),
                    ),
                };
                (section.title, nested)
            })
            .collect();
        NestedRecord { sections }
    }

    fn sort_key(&self, record: &NestedRecord) -> Result<NaiveDate, DateParseError> {
        let value = match record.section(CHECK_DATE_SECTION) {
            Some(NestedSection::Fields(fields)) => fields.get(CHECK_DATE_LABEL),
            _ => None,
        };
        parse_check_date(value)
    }
}
