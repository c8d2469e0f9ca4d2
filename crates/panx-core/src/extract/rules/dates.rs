//! Date-of-birth parsing.

use chrono::NaiveDate;

use crate::error::ExtractionError;

use super::patterns::DATE_DMY_STRICT;

/// Parse a zero-padded `DD/MM/YYYY` token into a calendar date.
///
/// Returns `Ok(None)` when the token does not have the date shape at all and
/// `Err(InvalidDate)` when it has the shape but names no real day.
pub fn parse_strict_dmy(token: &str) -> Result<Option<NaiveDate>, ExtractionError> {
    let Some(caps) = DATE_DMY_STRICT.captures(token) else {
        return Ok(None);
    };

    let day: u32 = caps[1].parse().unwrap_or(0);
    let month: u32 = caps[2].parse().unwrap_or(0);
    let year: i32 = caps[3].parse().unwrap_or(0);

    // Year zero has the shape but no place on a card
    NaiveDate::from_ymd_opt(year, month, day)
        .filter(|_| year >= 1)
        .map(Some)
        .ok_or_else(|| ExtractionError::InvalidDate {
            value: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strict_dmy() {
        assert_eq!(
            parse_strict_dmy("01/01/1990"),
            Ok(NaiveDate::from_ymd_opt(1990, 1, 1))
        );
        assert_eq!(
            parse_strict_dmy("29/02/2000"),
            Ok(NaiveDate::from_ymd_opt(2000, 2, 29))
        );
    }

    #[test]
    fn test_parse_rejects_unpadded_and_other_shapes() {
        assert_eq!(parse_strict_dmy("1/1/1990"), Ok(None));
        assert_eq!(parse_strict_dmy("01-01-1990"), Ok(None));
        assert_eq!(parse_strict_dmy("01/01/90"), Ok(None));
        assert_eq!(parse_strict_dmy("DOB 01/01/1990"), Ok(None));
    }

    #[test]
    fn test_parse_invalid_calendar_day() {
        assert_eq!(
            parse_strict_dmy("31/02/1990"),
            Err(ExtractionError::InvalidDate {
                value: "31/02/1990".to_string()
            })
        );
        assert!(parse_strict_dmy("01/13/1990").is_err());
        assert_eq!(
            parse_strict_dmy("01/01/0000"),
            Err(ExtractionError::InvalidDate {
                value: "01/01/0000".to_string()
            })
        );
    }

    #[test]
    fn test_parse_requires_ascii_digits() {
        // Arabic-Indic and fullwidth digits
        assert_eq!(
            parse_strict_dmy("\u{660}\u{661}/\u{660}\u{661}/\u{661}\u{669}\u{669}\u{660}"),
            Ok(None)
        );
        assert_eq!(parse_strict_dmy("０１/０１/１９９０"), Ok(None));
    }
}
