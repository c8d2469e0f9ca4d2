//! Configuration structures for the extractors.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PanxError, Result};

/// Main configuration for panx.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanxConfig {
    /// Line-based extraction configuration.
    pub lines: LineConfig,

    /// Delimited-string extraction configuration.
    pub tokens: TokenConfig,
}

/// Line-based extractor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Substring marking the first line of the card region (last match wins).
    pub start_marker: String,

    /// Substring marking the last line of the card region (first match wins).
    pub end_marker: String,

    /// Substring of the line preceding the ID.
    pub id_label: String,

    /// Lines whose trimmed length is at most this many characters are dropped.
    pub min_line_len: usize,

    /// How name, father's name and date of birth are located.
    pub layout: LayoutConfig,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            start_marker: "INCOME TAX DEPARTMENT".to_string(),
            end_marker: "Signature".to_string(),
            id_label: "Permanent Account Number".to_string(),
            min_line_len: 2,
            layout: LayoutConfig::default(),
        }
    }
}

/// Field layout for the line-based extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Layout mode.
    pub mode: LayoutMode,

    /// Offset of the name line in the filtered region.
    pub name_offset: usize,

    /// Offset of the father's name line.
    pub father_name_offset: usize,

    /// Offset of the date of birth line.
    pub dob_offset: usize,

    /// Label line preceding the name (labeled mode).
    pub name_label: String,

    /// Label line preceding the father's name (labeled mode).
    pub father_name_label: String,

    /// Label line preceding the date of birth (labeled mode).
    pub dob_label: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Positional,
            name_offset: 2,
            father_name_offset: 3,
            dob_offset: 4,
            name_label: "Name".to_string(),
            father_name_label: "Father's Name".to_string(),
            dob_label: "Date of Birth".to_string(),
        }
    }
}

/// How the line-based extractor maps lines to fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Fixed offsets from the start of the filtered region.
    #[default]
    Positional,
    /// Each field is the line following its label line.
    Labeled,
}

/// Delimited-string extractor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Field separator.
    pub delimiter: char,

    /// Characters removed from the whole input before splitting.
    pub strip_chars: String,

    /// Tokens whose trimmed length is at most this many characters are dropped.
    pub min_token_len: usize,

    /// Token preceding the name.
    pub name_anchor: String,

    /// Token preceding the ID.
    pub id_anchor: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            delimiter: '|',
            strip_chars: ".".to_string(),
            min_token_len: 2,
            name_anchor: "GOVT OF INDIA".to_string(),
            id_anchor: "Permanent Account Number".to_string(),
        }
    }
}

impl PanxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| PanxError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| PanxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
