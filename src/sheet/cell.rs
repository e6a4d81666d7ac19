// src/sheet/cell.rs
use std::fmt;

use calamine::Data;
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
// Floats beyond this are not printed as integers.
const MAX_WHOLE_FLOAT: f64 = 1e15;

/// A scalar read from one worksheet cell, passed through without coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDateTime),
    Blank,
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// The cell's text, if it is a text cell. Section titles only ever match text cells.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    fn whole_float(value: f64) -> Option<i64> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_WHOLE_FLOAT {
            Some(value as i64)
        } else {
            None
        }
    }
}

/// Renders the cell the way it appears in composite keys and CSV fields.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(value) => match Self::whole_float(*value) {
                Some(whole) => write!(f, "{}", whole),
                None => write!(f, "{}", value),
            },
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(dt) => write!(f, "{}", dt.format(DATE_DISPLAY_FORMAT)),
            CellValue::Blank => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(text) => serializer.serialize_str(text),
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Float(value) => match Self::whole_float(*value) {
                Some(whole) => serializer.serialize_i64(whole),
                None => serializer.serialize_f64(*value),
            },
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Date(dt) => serializer.collect_str(&dt.format(DATE_DISPLAY_FORMAT)),
            CellValue::Blank => serializer.serialize_none(),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Blank,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) if dt.is_datetime() => dt
                .as_datetime()
                .map(CellValue::Date)
                .unwrap_or(CellValue::Float(dt.as_f64())),
            Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
            Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .map(CellValue::Date)
                .unwrap_or_else(|_| CellValue::Text(s.clone())),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use chrono::NaiveDate;

    #[test]
    fn test_display_renders_whole_floats_as_integers() {
        assert_eq!(CellValue::Float(800.0).to_string(), "800");
        assert_eq!(CellValue::Float(12.5).to_string(), "12.5");
        assert_eq!(CellValue::Int(40).to_string(), "40");
        assert_eq!(CellValue::Blank.to_string(), "");
    }

    #[test]
    fn test_serialize_json_scalars() {
        assert_eq!(serde_json::to_string(&CellValue::Float(40.0)).unwrap(), "40");
        assert_eq!(serde_json::to_string(&CellValue::Float(20.25)).unwrap(), "20.25");
        assert_eq!(serde_json::to_string(&CellValue::Blank).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&CellValue::Text("Acme".to_string())).unwrap(),
            "\"Acme\""
        );
    }

    fn excel_date(serial: f64, is_1904: bool) -> Data {
        Data::DateTime(ExcelDateTime::new(serial, ExcelDateTimeType::DateTime, is_1904))
    }

    #[test]
    fn test_date_cells_in_both_epochs() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(CellValue::from(&excel_date(45352.0, false)), CellValue::Date(expected));
        assert_eq!(CellValue::from(&excel_date(43890.0, true)), CellValue::Date(expected));

        let first = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(CellValue::from(&excel_date(1.0, false)), CellValue::Date(first));

        let noon = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(CellValue::from(&excel_date(45352.5, false)), CellValue::Date(noon));
        assert_eq!(CellValue::Date(noon).to_string(), "2024-03-01 12:00:00");
    }

    #[test]
    fn test_duration_cells_stay_numeric() {
        let duration = Data::DateTime(ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false));
        assert_eq!(CellValue::from(&duration), CellValue::Float(1.5));
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Blank);
        assert_eq!(
            CellValue::from(&Data::String("Earnings".to_string())),
            CellValue::Text("Earnings".to_string())
        );
        assert_eq!(CellValue::from(&Data::Float(20.0)), CellValue::Float(20.0));
        assert_eq!(
            CellValue::from(&Data::DateTimeIso("2024-03-01T00:00:00".to_string())),
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap())
        );
    }
}
