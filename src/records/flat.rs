// src/records/flat.rs
use std::collections::HashSet;

use chrono::NaiveDate;

use crate::extractors::{Payslip, SectionBody};
use crate::records::{parse_check_date, FieldMap, RecordLayout, CHECK_DATE_LABEL, CHECK_DATE_SECTION};
use crate::utils::error::DateParseError;

const KEY_SEPARATOR: &str = " - ";

/// Composite key → value, e.g. `"Earnings - Regular - Hours"`.
pub type FlatRecord = FieldMap;

pub fn composite_key(parts: &[&str]) -> String {
    parts.join(KEY_SEPARATOR)
}

/// Flattens every section into title-prefixed composite keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatLayout;

impl RecordLayout for FlatLayout {
    type Record = FlatRecord;

    fn project(&self, payslip: Payslip) -> FlatRecord {
        let mut record = FlatRecord::new();
        for section in payslip.sections {
            match section.body {
                SectionBody::Fields(fields) => {
                    for field in fields {
                        record.insert(composite_key(&[section.title.as_str(), &field.label]), field.value);
                    }
                }
                SectionBody::Rows(rows) => {
                    for row in rows {
                        for field in row.fields {
                            record.insert(
                                composite_key(&[section.title.as_str(), &row.label, &field.label]),
                                field.value,
                            );
                        }
                    }
                }
            }
        }
        record
    }

    fn sort_key(&self, record: &FlatRecord) -> Result<NaiveDate, DateParseError> {
        parse_check_date(record.get(&composite_key(&[CHECK_DATE_SECTION, CHECK_DATE_LABEL])))
    }
}

/// Union of all keys across `records`, in first-seen order.
pub fn union_keys(records: &[FlatRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for key in records.iter().flat_map(|record| record.keys()) {
        if seen.insert(key) {
            keys.push(key.to_string());
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{Field, GridRow, Section};
    use crate::sheet::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn sample_payslip() -> Payslip {
        Payslip {
            source: None,
            sections: vec![
                Section {
                    title: "Company Information".to_string(),
                    body: SectionBody::Fields(vec![Field { label: "Name".to_string(), value: text("Acme") }]),
                },
                Section {
                    title: "Earnings".to_string(),
                    body: SectionBody::Rows(vec![GridRow {
                        label: "Regular".to_string(),
                        fields: vec![
                            Field { label: "Hours".to_string(), value: CellValue::Float(40.0) },
                            Field { label: "Amount".to_string(), value: CellValue::Float(800.0) },
                        ],
                    }]),
                },
            ],
        }
    }

    #[test]
    fn test_project_builds_composite_keys() {
        let record = FlatLayout.project(sample_payslip());
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec![
                "Company Information - Name",
                "Earnings - Regular - Hours",
                "Earnings - Regular - Amount",
            ]
        );
        assert_eq!(record.get("Company Information - Name"), Some(&text("Acme")));
        assert_eq!(record.get("Earnings - Regular - Amount"), Some(&CellValue::Float(800.0)));
    }

    #[test]
    fn test_sort_key_reads_check_date() {
        let mut record = FlatRecord::new();
        assert_eq!(FlatLayout.sort_key(&record).unwrap(), crate::records::missing_check_date());

        record.insert("Payslip Information - Check Date", text("1/15/2023"));
        assert_eq!(
            FlatLayout.sort_key(&record).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_union_keys_is_first_seen_and_deduplicated() {
        let mut first = FlatRecord::new();
        first.insert("A", text("1"));
        first.insert("B", text("2"));
        let mut second = FlatRecord::new();
        second.insert("C", text("3"));
        second.insert("A", text("4"));

        assert_eq!(union_keys(&[first, second]), vec!["A", "B", "C"]);
    }
}
