//! Error types for the panx-core library.

use thiserror::Error;

/// Main error type for the panx library.
#[derive(Error, Debug)]
pub enum PanxError {
    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to identity field extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A field could not be located in the input.
    #[error("field not found: {field}")]
    FieldNotFound { field: String },

    /// A boundary marker line or anchor token is absent.
    #[error("marker not found: {marker}")]
    MarkerNotFound { marker: String },

    /// A token looked like a date but is not a valid calendar day.
    #[error("invalid date: {value}")]
    InvalidDate { value: String },
}

impl ExtractionError {
    pub(crate) fn field(name: impl Into<String>) -> Self {
        Self::FieldNotFound { field: name.into() }
    }

    pub(crate) fn marker(marker: impl Into<String>) -> Self {
        Self::MarkerNotFound {
            marker: marker.into(),
        }
    }
}

/// Result type for the panx library.
pub type Result<T> = std::result::Result<T, PanxError>;
