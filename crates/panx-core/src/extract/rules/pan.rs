//! PAN (Permanent Account Number) shape checks.
//!
//! Extraction captures the number verbatim. These helpers only report
//! whether a captured value looks like a PAN.

use super::patterns::PAN_NUMBER;

/// Check whether `value` has the 5-letter, 4-digit, 1-letter PAN shape.
pub fn is_pan_format(value: &str) -> bool {
    PAN_NUMBER.is_match(value.trim())
}

/// Validate a PAN and describe the first problem found.
pub fn validate_pan(value: &str) -> Result<(), String> {
    let value = value.trim();

    if value.chars().count() != 10 {
        return Err(format!(
            "expected 10 characters, found {}",
            value.chars().count()
        ));
    }

    let chars: Vec<char> = value.chars().collect();

    if let Some(pos) = chars[..5].iter().position(|c| !c.is_ascii_uppercase()) {
        return Err(format!("character {} should be an uppercase letter", pos + 1));
    }

    if let Some(pos) = chars[5..9].iter().position(|c| !c.is_ascii_digit()) {
        return Err(format!("character {} should be a digit", pos + 6));
    }

    if !chars[9].is_ascii_uppercase() {
        return Err("character 10 should be an uppercase letter".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pan_format() {
        assert!(is_pan_format("ABCDE1234F"));
        assert!(is_pan_format(" ABCDE1234F "));
        assert!(!is_pan_format("ABCD1234F"));
        assert!(!is_pan_format("abcde1234f"));
        assert!(!is_pan_format("ABCDE12345"));
    }

    #[test]
    fn test_validate_pan_reports_position() {
        assert_eq!(validate_pan("ABCDE1234F"), Ok(()));
        assert_eq!(
            validate_pan("ABC1E1234F"),
            Err("character 4 should be an uppercase letter".to_string())
        );
        assert_eq!(
            validate_pan("ABCDE12O4F"),
            Err("character 8 should be a digit".to_string())
        );
        assert!(validate_pan("ABCDE1234").is_err());
    }
}
