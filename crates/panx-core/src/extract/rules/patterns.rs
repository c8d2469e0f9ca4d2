//! Common regex patterns for PAN card extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Strict zero-padded DD/MM/YYYY in ASCII digits, the only date form printed on the card
    pub static ref DATE_DMY_STRICT: Regex = Regex::new(
        r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$"
    ).unwrap();

    // PAN: 5 letters, 4 digits, 1 letter
    pub static ref PAN_NUMBER: Regex = Regex::new(
        r"^[A-Z]{5}[0-9]{4}[A-Z]$"
    ).unwrap();
}
