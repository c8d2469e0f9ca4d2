//! Line-based extraction for OCR output with one text region per line.

use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::{LayoutConfig, LayoutMode, LineConfig};
use crate::models::record::{DateOfBirth, IdentityRecord, IdType, RecordTable};

use super::rules::{is_pan_format, keep_if_longer};
use super::{IdentityExtractor, Result};

/// Isolates the card region of an OCR line dump.
#[derive(Debug, Clone)]
pub struct LineFilter {
    start_marker: String,
    end_marker: String,
    min_len: usize,
}

impl LineFilter {
    /// Create a filter with the PAN card markers.
    pub fn new() -> Self {
        Self::from_config(&LineConfig::default())
    }

    pub fn from_config(config: &LineConfig) -> Self {
        Self {
            start_marker: config.start_marker.clone(),
            end_marker: config.end_marker.clone(),
            min_len: config.min_line_len,
        }
    }

    /// Set the start marker substring.
    pub fn with_start_marker(mut self, marker: impl Into<String>) -> Self {
        self.start_marker = marker.into();
        self
    }

    /// Set the end marker substring.
    pub fn with_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_marker = marker.into();
        self
    }

    /// Set the length at or below which trimmed lines are dropped.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Locate the inclusive `[start, end]` line range of the card.
    ///
    /// The start is the last start-marker line seen before the first
    /// end-marker line; scanning stops at the end marker.
    pub fn region<S: AsRef<str>>(&self, lines: &[S]) -> Result<(usize, usize)> {
        let mut start = None;
        let mut end = None;

        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.contains(&self.start_marker) {
                start = Some(i);
            }
            if line.contains(&self.end_marker) {
                end = Some(i);
                break;
            }
        }

        match (start, end) {
            (Some(start), Some(end)) => Ok((start, end)),
            (None, _) => Err(ExtractionError::marker(&self.start_marker)),
            (_, None) => Err(ExtractionError::marker(&self.end_marker)),
        }
    }

    /// Return the trimmed, non-noise lines of the card region.
    ///
    /// Yields an empty vector when either marker is missing.
    pub fn filter<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        match self.region(lines) {
            Ok((start, end)) => self.clean(&lines[start..=end]),
            Err(_) => Vec::new(),
        }
    }

    fn clean<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines
            .iter()
            .filter_map(|l| keep_if_longer(l.as_ref(), self.min_len))
            .map(str::to_string)
            .collect()
    }
}

impl Default for LineFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter OCR lines down to the card region using the default markers.
pub fn filter_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    LineFilter::new().filter(lines)
}

/// Reads identity fields from the filtered card region.
#[derive(Debug, Clone)]
pub struct LineExtractor {
    filter: LineFilter,
    id_label: String,
    layout: LayoutConfig,
}

impl LineExtractor {
    /// Create an extractor with the legacy positional layout.
    pub fn new() -> Self {
        Self::from_config(&LineConfig::default())
    }

    pub fn from_config(config: &LineConfig) -> Self {
        Self {
            filter: LineFilter::from_config(config),
            id_label: config.id_label.clone(),
            layout: config.layout.clone(),
        }
    }

    /// Replace the region filter.
    pub fn with_filter(mut self, filter: LineFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the layout mode.
    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout.mode = mode;
        self
    }

    /// Extract a one-row table from raw OCR lines.
    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Result<RecordTable> {
        info!("Extracting PAN fields from {} lines", lines.len());

        let (start, end) = self.filter.region(lines)?;
        let filtered = self.filter.clean(&lines[start..=end]);
        debug!("Filtered lines: {:?}", filtered);

        self.read_fields(&filtered).map(RecordTable::single)
    }

    /// Map an already filtered region to a record.
    pub fn read_fields<S: AsRef<str>>(&self, lines: &[S]) -> Result<IdentityRecord> {
        let (name, father_name, dob) = match self.layout.mode {
            LayoutMode::Positional => self.read_positional(lines)?,
            LayoutMode::Labeled => self.read_labeled(lines)?,
        };
        let id = self.read_id(lines)?;
        if !is_pan_format(&id) {
            warn!("ID '{}' does not look like a PAN", id);
        }

        Ok(IdentityRecord {
            id,
            name,
            father_name,
            dob: DateOfBirth::Text(dob),
            id_type: IdType::Pan,
        })
    }

    fn read_positional<S: AsRef<str>>(&self, lines: &[S]) -> Result<(String, String, String)> {
        let at = |offset: usize, field: &str| {
            lines
                .get(offset)
                .map(|l| l.as_ref().trim().to_string())
                .ok_or_else(|| ExtractionError::field(field))
        };

        Ok((
            at(self.layout.name_offset, "Name")?,
            at(self.layout.father_name_offset, "Father's Name")?,
            at(self.layout.dob_offset, "DOB")?,
        ))
    }

    fn read_labeled<S: AsRef<str>>(&self, lines: &[S]) -> Result<(String, String, String)> {
        let labels = [
            ("Name", self.layout.name_label.as_str()),
            ("Father's Name", self.layout.father_name_label.as_str()),
            ("DOB", self.layout.dob_label.as_str()),
        ];

        let mut values = Vec::with_capacity(labels.len());
        let mut cursor = 0;

        // Labels are matched in order so "Name" cannot pick up "Father's Name".
        for (field, label) in labels {
            let label = label.to_lowercase();
            let pos = lines
                .iter()
                .skip(cursor)
                .position(|l| l.as_ref().to_lowercase().contains(&label))
                .map(|p| p + cursor)
                .ok_or_else(|| ExtractionError::field(field))?;

            let value = lines
                .get(pos + 1)
                .map(|l| l.as_ref().trim().to_string())
                .ok_or_else(|| ExtractionError::field(field))?;

            values.push(value);
            cursor = pos + 2;
        }

        let dob = values.pop().unwrap_or_default();
        let father_name = values.pop().unwrap_or_default();
        let name = values.pop().unwrap_or_default();
        Ok((name, father_name, dob))
    }

    fn read_id<S: AsRef<str>>(&self, lines: &[S]) -> Result<String> {
        let label_pos = lines
            .iter()
            .rposition(|l| l.as_ref().contains(&self.id_label))
            .ok_or_else(|| ExtractionError::field("ID"))?;

        lines
            .get(label_pos + 1)
            .map(|l| l.as_ref().trim().to_string())
            .ok_or_else(|| ExtractionError::field("ID"))
    }
}

impl Default for LineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityExtractor for LineExtractor {
    fn extract_record(&self, text: &str) -> Result<IdentityRecord> {
        let lines: Vec<&str> = text.lines().collect();
        let table = self.extract(&lines)?;
        table
            .into_rows()
            .into_iter()
            .next()
            .ok_or_else(|| ExtractionError::field("ID"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn card_lines() -> Vec<&'static str> {
        vec![
            "noise before",
            "INCOME TAX DEPARTMENT",
            "GOVT. OF INDIA",
            "  JOHN DOE ",
            "RICHARD DOE",
            "01/01/1990",
            "ab",
            "Permanent Account Number",
            "ABCDE1234F",
            "Signature",
            "trailing noise",
        ]
    }

    #[test]
    fn test_filter_keeps_marked_region() {
        let filtered = filter_lines(&card_lines());
        assert_eq!(
            filtered,
            vec![
                "INCOME TAX DEPARTMENT",
                "GOVT. OF INDIA",
                "JOHN DOE",
                "RICHARD DOE",
                "01/01/1990",
                "Permanent Account Number",
                "ABCDE1234F",
                "Signature",
            ]
        );
    }

    #[test]
    fn test_filter_last_start_marker_wins() {
        let lines = [
            "INCOME TAX DEPARTMENT",
            "first header",
            "INCOME TAX DEPARTMENT copy",
            "body",
            "Signature",
            "INCOME TAX DEPARTMENT after end",
        ];
        assert_eq!(
            filter_lines(&lines),
            vec!["INCOME TAX DEPARTMENT copy", "body", "Signature"]
        );
    }

    #[test]
    fn test_filter_stops_at_first_end_marker() {
        let lines = ["INCOME TAX DEPARTMENT", "Signature", "more", "Signature"];
        assert_eq!(
            filter_lines(&lines),
            vec!["INCOME TAX DEPARTMENT", "Signature"]
        );
    }

    #[test]
    fn test_filter_missing_marker_is_empty() {
        assert!(filter_lines(&["INCOME TAX DEPARTMENT", "JOHN DOE"]).is_empty());
        assert!(filter_lines(&["JOHN DOE", "Signature"]).is_empty());
        // start marker after the end marker is never seen
        assert!(filter_lines(&["Signature", "INCOME TAX DEPARTMENT"]).is_empty());
        assert!(filter_lines::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_region_names_missing_marker() {
        let filter = LineFilter::new();
        assert_eq!(
            filter.region(&["JOHN DOE", "Signature"]),
            Err(ExtractionError::MarkerNotFound {
                marker: "INCOME TAX DEPARTMENT".to_string()
            })
        );
        assert_eq!(
            filter.region(&["INCOME TAX DEPARTMENT"]),
            Err(ExtractionError::MarkerNotFound {
                marker: "Signature".to_string()
            })
        );
    }

    #[test]
    fn test_extract_positional() {
        let table = LineExtractor::new().extract(&card_lines()).unwrap();
        assert_eq!(table.len(), 1);

        let record = table.first().unwrap();
        assert_eq!(record.id, "ABCDE1234F");
        assert_eq!(record.name, "JOHN DOE");
        assert_eq!(record.father_name, "RICHARD DOE");
        assert_eq!(record.dob, DateOfBirth::Text("01/01/1990".to_string()));
        assert_eq!(record.id_type, IdType::Pan);
    }

    #[test]
    fn test_last_id_label_wins() {
        let lines = [
            "INCOME TAX DEPARTMENT",
            "GOVT OF INDIA",
            "JOHN DOE",
            "RICHARD DOE",
            "01/01/1990",
            "Permanent Account Number",
            "OLDXX0000X",
            "Permanent Account Number Card",
            "ABCDE1234F",
            "Signature",
        ];
        let record = LineExtractor::new().extract_record(&lines.join("\n")).unwrap();
        assert_eq!(record.id, "ABCDE1234F");
    }

    #[test]
    fn test_missing_markers_is_an_error() {
        let result = LineExtractor::new().extract(&["JOHN DOE", "RICHARD DOE"]);
        assert!(matches!(
            result,
            Err(ExtractionError::MarkerNotFound { .. })
        ));
    }

    #[test]
    fn test_short_region_is_field_not_found() {
        let lines = ["INCOME TAX DEPARTMENT", "GOVT OF INDIA", "JOHN DOE", "Signature"];
        assert_eq!(
            LineExtractor::new().extract(&lines),
            Err(ExtractionError::FieldNotFound {
                field: "DOB".to_string()
            })
        );
    }

    #[test]
    fn test_id_label_missing_or_last() {
        let without_label = [
            "INCOME TAX DEPARTMENT",
            "GOVT OF INDIA",
            "JOHN DOE",
            "RICHARD DOE",
            "01/01/1990",
            "Signature",
        ];
        assert_eq!(
            LineExtractor::new().extract(&without_label),
            Err(ExtractionError::field("ID"))
        );

        let label_last = [
            "INCOME TAX DEPARTMENT",
            "GOVT OF INDIA",
            "JOHN DOE",
            "RICHARD DOE",
            "01/01/1990",
            "Permanent Account Number Signature",
        ];
        assert_eq!(
            LineExtractor::new().extract(&label_last),
            Err(ExtractionError::field("ID"))
        );
    }

    #[test]
    fn test_extract_labeled_layout() {
        let lines = [
            "INCOME TAX DEPARTMENT",
            "GOVT OF INDIA",
            "Permanent Account Number Card",
            "ABCDE1234F",
            "Name",
            "JOHN DOE",
            "Father's Name",
            "RICHARD DOE",
            "Date of Birth",
            "01/01/1990",
            "Signature",
        ];
        let extractor = LineExtractor::new().with_layout_mode(LayoutMode::Labeled);
        let record = extractor.extract_record(&lines.join("\n")).unwrap();

        assert_eq!(record.name, "JOHN DOE");
        assert_eq!(record.father_name, "RICHARD DOE");
        assert_eq!(record.dob, DateOfBirth::Text("01/01/1990".to_string()));
        assert_eq!(record.id, "ABCDE1234F");
    }

    #[test]
    fn test_labeled_layout_missing_label() {
        let lines = ["INCOME TAX DEPARTMENT", "Name", "JOHN DOE", "Signature"];
        let extractor = LineExtractor::new().with_layout_mode(LayoutMode::Labeled);
        assert_eq!(
            extractor.extract(&lines),
            Err(ExtractionError::field("Father's Name"))
        );
    }

    #[test]
    fn test_custom_filter() {
        let lines = [
            "e-PAN",
            "HOLDER",
            "JANE ROE",
            "JOHN ROE",
            "15/08/1985",
            "Permanent Account Number",
            "ZYXWV9876A",
            "QR",
            "END",
        ];
        let filter = LineFilter::new()
            .with_start_marker("e-PAN")
            .with_end_marker("END")
            .with_min_len(2);
        let extractor = LineExtractor::new().with_filter(filter);
        let record = extractor.extract_record(&lines.join("\n")).unwrap();

        assert_eq!(record.name, "JANE ROE");
        assert_eq!(record.dob.to_string(), "15/08/1985");
        assert_eq!(record.id, "ZYXWV9876A");
    }

    #[test]
    fn test_extract_is_repeatable() {
        let extractor = LineExtractor::new();
        assert_eq!(
            extractor.extract(&card_lines()),
            extractor.extract(&card_lines())
        );
    }
}
