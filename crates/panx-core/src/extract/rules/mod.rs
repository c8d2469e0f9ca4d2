//! Rule-based helpers for PAN card fields.

pub mod dates;
pub mod pan;
pub mod patterns;

pub use dates::parse_strict_dmy;
pub use pan::{is_pan_format, validate_pan};
pub use patterns::*;

/// Strip surrounding whitespace and keep the text only if it is longer than
/// `min_len` characters.
pub fn keep_if_longer(text: &str, min_len: usize) -> Option<&str> {
    let trimmed = text.trim();
    (trimmed.chars().count() > min_len).then_some(trimmed)
}
