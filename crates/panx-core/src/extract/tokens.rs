//! Anchor-token extraction for pipe-delimited OCR output.

use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::TokenConfig;
use crate::models::record::{DateOfBirth, IdentityRecord, IdType};

use super::rules::dates::parse_strict_dmy;
use super::rules::keep_if_longer;
use super::{IdentityExtractor, Result};

/// How much of the record a delimited extraction recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Every field was found.
    Complete,
    /// Some fields were found, others were left empty.
    Partial,
    /// Nothing could be extracted.
    Empty,
}

/// Record produced by [`TokenExtractor`] together with what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenExtraction {
    /// Extracted record; missing fields are empty.
    pub record: IdentityRecord,
    /// Recovered failures, in the order they were hit.
    pub diagnostics: Vec<ExtractionError>,
}

impl TokenExtraction {
    pub fn outcome(&self) -> ExtractionOutcome {
        let record = &self.record;
        if record.is_empty() {
            ExtractionOutcome::Empty
        } else if record.id.is_empty()
            || record.name.is_empty()
            || record.father_name.is_empty()
            || record.dob.is_empty()
        {
            ExtractionOutcome::Partial
        } else {
            ExtractionOutcome::Complete
        }
    }

    /// Check whether every field was found.
    pub fn is_complete(&self) -> bool {
        self.outcome() == ExtractionOutcome::Complete
    }

    pub fn into_record(self) -> IdentityRecord {
        self.record
    }
}

/// Split a delimited string into cleaned tokens.
///
/// Strip characters are removed from the whole input first, then tokens are
/// trimmed and those not longer than `min_token_len` are dropped.
pub fn tokenize(input: &str, config: &TokenConfig) -> Vec<String> {
    let stripped: String = input
        .chars()
        .filter(|c| !config.strip_chars.contains(*c))
        .collect();

    stripped
        .split(config.delimiter)
        .filter_map(|t| keep_if_longer(t, config.min_token_len))
        .map(str::to_string)
        .collect()
}

/// Locates fields in a delimited string by their anchor tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenExtractor {
    config: TokenConfig,
}

impl TokenExtractor {
    /// Create an extractor with the PAN card anchors.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TokenConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Set the token preceding the name.
    pub fn with_name_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.config.name_anchor = anchor.into();
        self
    }

    /// Set the token preceding the ID.
    pub fn with_id_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.config.id_anchor = anchor.into();
        self
    }

    /// Set the field separator.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Extract a record, recovering from any missing field.
    pub fn extract(&self, input: &str) -> TokenExtraction {
        let tokens = tokenize(input, &self.config);
        info!("Extracting PAN fields from {} tokens", tokens.len());
        debug!("Tokens: {:?}", tokens);

        let mut record = IdentityRecord::new();
        let mut diagnostics = Vec::new();

        // Name, father's name and ID succeed or fail together.
        match self.lookup_anchored(&tokens) {
            Ok((name, father_name, id)) => {
                record.name = name;
                record.father_name = father_name;
                record.id = id;
            }
            Err(e) => {
                warn!("Some required information is missing or incorrectly formatted: {}", e);
                diagnostics.push(e);
            }
        }

        match self.scan_dob(&tokens, &mut diagnostics) {
            Some(dob) => record.dob = dob,
            None => {
                warn!("Date of birth not found");
                diagnostics.push(ExtractionError::field("DOB"));
            }
        }

        record.id_type = IdType::Pan;
        TokenExtraction {
            record,
            diagnostics,
        }
    }

    fn lookup_anchored(&self, tokens: &[String]) -> Result<(String, String, String)> {
        let name_pos = self.anchor_position(tokens, &self.config.name_anchor)? + 1;
        let name = token_at(tokens, name_pos, "Name")?;
        let father_name = token_at(tokens, name_pos + 1, "Father's Name")?;

        let id_pos = self.anchor_position(tokens, &self.config.id_anchor)? + 1;
        let id = token_at(tokens, id_pos, "ID")?;

        Ok((name, father_name, id))
    }

    fn anchor_position(&self, tokens: &[String], anchor: &str) -> Result<usize> {
        tokens
            .iter()
            .position(|t| t == anchor)
            .ok_or_else(|| ExtractionError::marker(anchor))
    }

    /// First token that is a valid `DD/MM/YYYY` date.
    fn scan_dob(
        &self,
        tokens: &[String],
        diagnostics: &mut Vec<ExtractionError>,
    ) -> Option<DateOfBirth> {
        for token in tokens {
            match parse_strict_dmy(token) {
                Ok(Some(date)) => return Some(DateOfBirth::Date(date)),
                Ok(None) => continue,
                Err(e) => {
                    debug!("Skipping token: {}", e);
                    diagnostics.push(e);
                }
            }
        }
        None
    }
}

fn token_at(tokens: &[String], pos: usize, field: &str) -> Result<String> {
    tokens
        .get(pos)
        .cloned()
        .ok_or_else(|| ExtractionError::field(field))
}

impl IdentityExtractor for TokenExtractor {
    fn extract_record(&self, text: &str) -> Result<IdentityRecord> {
        Ok(self.extract(text).into_record())
    }
}
