//! Identity record model shared by both extractors.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extract::rules::pan::validate_pan;

/// Column names of the tabular output, in order.
pub const COLUMNS: [&str; 5] = ["ID", "Name", "Father's Name", "DOB", "ID Type"];

/// Fields extracted from one identity document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Document number, captured verbatim.
    #[serde(rename = "ID")]
    pub id: String,

    /// Holder's full name as printed.
    #[serde(rename = "Name")]
    pub name: String,

    /// Father's name as printed.
    #[serde(rename = "Father's Name")]
    pub father_name: String,

    /// Date of birth.
    #[serde(rename = "DOB")]
    pub dob: DateOfBirth,

    /// Document type.
    #[serde(rename = "ID Type")]
    pub id_type: IdType,
}

/// Date of birth as produced by an extractor.
///
/// The line-based path keeps the raw printed text while the delimited path
/// parses it into a calendar date. An absent value is `Text("")`.
///
/// Deserialization tries `Date` first, so any ISO `YYYY-MM-DD` string comes
/// back as `Date` even if it was captured as text. Card text is printed as
/// `DD/MM/YYYY` and stays `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateOfBirth {
    /// Parsed calendar date.
    Date(NaiveDate),
    /// Raw text, possibly empty.
    Text(String),
}

impl DateOfBirth {
    /// Check whether no date of birth was captured.
    pub fn is_empty(&self) -> bool {
        matches!(self, DateOfBirth::Text(s) if s.is_empty())
    }

    /// The parsed date, if this value holds one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            DateOfBirth::Date(date) => Some(*date),
            DateOfBirth::Text(_) => None,
        }
    }
}

impl Default for DateOfBirth {
    fn default() -> Self {
        DateOfBirth::Text(String::new())
    }
}

impl fmt::Display for DateOfBirth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOfBirth::Date(date) => write!(f, "{}", date),
            DateOfBirth::Text(text) => f.write_str(text),
        }
    }
}

/// Supported identity document types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdType {
    /// Permanent Account Number card.
    #[default]
    #[serde(rename = "PAN")]
    Pan,
}

impl IdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::Pan => "PAN",
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IdentityRecord {
    /// Create an empty PAN record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the record as string cells in [`COLUMNS`] order.
    pub fn to_row(&self) -> [String; 5] {
        [
            self.id.clone(),
            self.name.clone(),
            self.father_name.clone(),
            self.dob.to_string(),
            self.id_type.to_string(),
        ]
    }

    /// Check whether every extracted field is empty.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.name.is_empty()
            && self.father_name.is_empty()
            && self.dob.is_empty()
    }

    /// Validate the record data and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.id.is_empty() {
            issues.push("Missing ID".to_string());
        } else if let Err(reason) = validate_pan(&self.id) {
            issues.push(format!("ID '{}' is not a valid PAN: {}", self.id, reason));
        }

        if self.name.is_empty() {
            issues.push("Missing name".to_string());
        }

        if self.father_name.is_empty() {
            issues.push("Missing father's name".to_string());
        }

        if self.dob.is_empty() {
            issues.push("Missing date of birth".to_string());
        }

        issues
    }
}

/// Tabular output of the line-based extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTable {
    rows: Vec<IdentityRecord>,
}

impl RecordTable {
    /// Build a single-row table.
    pub fn single(record: IdentityRecord) -> Self {
        Self {
            rows: vec![record],
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[IdentityRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row, which is the only row for extractor output.
    pub fn first(&self) -> Option<&IdentityRecord> {
        self.rows.first()
    }

    pub fn into_rows(self) -> Vec<IdentityRecord> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> IdentityRecord {
        IdentityRecord {
            id: "ABCDE1234F".to_string(),
            name: "JOHN DOE".to_string(),
            father_name: "RICHARD DOE".to_string(),
            dob: DateOfBirth::Date(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()),
            id_type: IdType::Pan,
        }
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["ID"], "ABCDE1234F");
        assert_eq!(json["Name"], "JOHN DOE");
        assert_eq!(json["Father's Name"], "RICHARD DOE");
        assert_eq!(json["DOB"], "1990-01-01");
        assert_eq!(json["ID Type"], "PAN");
    }

    #[test]
    fn test_date_of_birth_forms() {
        let parsed: IdentityRecord = serde_json::from_value(serde_json::json!({
            "ID": "ABCDE1234F",
            "Name": "JOHN DOE",
            "Father's Name": "RICHARD DOE",
            "DOB": "1990-01-01",
            "ID Type": "PAN",
        }))
        .unwrap();
        assert_eq!(parsed, sample());
        assert_eq!(parsed.dob.as_date(), NaiveDate::from_ymd_opt(1990, 1, 1));

        let raw = DateOfBirth::Text("01/01/1990".to_string());
        assert_eq!(raw.as_date(), None);
        assert_eq!(raw.to_string(), "01/01/1990");
        assert!(!raw.is_empty());
    }

    #[test]
    fn test_date_of_birth_deserialization_promotes_iso_text() {
        let raw: DateOfBirth = serde_json::from_str(r#""01/01/1990""#).unwrap();
        assert_eq!(raw, DateOfBirth::Text("01/01/1990".to_string()));

        let iso = serde_json::to_string(&DateOfBirth::Text("1990-01-01".to_string())).unwrap();
        let back: DateOfBirth = serde_json::from_str(&iso).unwrap();
        assert_eq!(back.as_date(), NaiveDate::from_ymd_opt(1990, 1, 1));

        let empty: DateOfBirth = serde_json::from_str(r#""""#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_default_record_is_empty_pan() {
        let record = IdentityRecord::new();
        assert!(record.is_empty());
        assert_eq!(record.id_type, IdType::Pan);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["DOB"], "");
    }

    #[test]
    fn test_to_row_follows_columns() {
        let row = sample().to_row();
        assert_eq!(
            row,
            [
                "ABCDE1234F".to_string(),
                "JOHN DOE".to_string(),
                "RICHARD DOE".to_string(),
                "1990-01-01".to_string(),
                "PAN".to_string(),
            ]
        );
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_empty());

        let mut record = sample();
        record.id = "ABCD1234F".to_string();
        record.dob = DateOfBirth::default();
        let issues = record.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("not a valid PAN: expected 10 characters"));

        assert_eq!(IdentityRecord::new().validate().len(), 4);
    }

    #[test]
    fn test_single_row_table() {
        let table = RecordTable::single(sample());
        assert_eq!(table.len(), 1);
        assert_eq!(table.columns(), &COLUMNS);
        assert_eq!(table.first(), Some(&sample()));
    }
}
