//! Core library for PAN card field extraction.
//!
//! This crate provides:
//! - Line-based extraction from OCR output with one text region per line
//! - Anchor-token extraction from pipe-delimited OCR output
//! - The identity record model and extractor configuration

pub mod error;
pub mod extract;
pub mod models;

pub use error::{ExtractionError, PanxError, Result};
pub use extract::{
    filter_lines, tokenize, ExtractionOutcome, IdentityExtractor, LineExtractor, LineFilter,
    TokenExtraction, TokenExtractor,
};
pub use models::config::{LayoutMode, PanxConfig};
pub use models::record::{DateOfBirth, IdType, IdentityRecord, RecordTable};
