//! Identity field extraction module.

pub mod lines;
pub mod rules;
pub mod tokens;

pub use lines::{filter_lines, LineExtractor, LineFilter};
pub use tokens::{tokenize, ExtractionOutcome, TokenExtraction, TokenExtractor};

use crate::error::ExtractionError;
use crate::models::record::IdentityRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for identity record extractors that work on raw text.
pub trait IdentityExtractor {
    /// Extract a record from the text of one document.
    fn extract_record(&self, text: &str) -> Result<IdentityRecord>;
}
