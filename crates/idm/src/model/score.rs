//! Composite score text convention.
//!
//! Scores are kept as `f64`; the display text uses a comma as decimal
//! separator (`85,11`). Formatting writes the shortest decimal text that
//! parses back to the same `f64`, so `parse_skor(&format_skor(x)) == x`
//! for every finite `x`.

use crate::error::{IdmError, Result};

/// Decimal separator of the regional numeral convention.
pub const DECIMAL_SEPARATOR: char = ',';

/// Format a score for display (`72.4` becomes `"72,4"`).
pub fn format_skor(value: f64) -> String {
    value.to_string().replace('.', ",")
}

/// Parse a score written with the comma-decimal convention.
///
/// Accepts an optional leading minus, digits, and at most one comma followed
/// by at least one digit. Dots, exponents and non-finite spellings are
/// rejected.
pub fn parse_skor(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if !is_comma_decimal(trimmed) {
        return Err(IdmError::InvalidScore(text.to_string()));
    }

    trimmed
        .replace(DECIMAL_SEPARATOR, ".")
        .parse::<f64>()
        .map_err(|_| IdmError::InvalidScore(text.to_string()))
}

/// Round half away from zero to a fixed number of decimals.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn is_comma_decimal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = match digits.split_once(DECIMAL_SEPARATOR) {
        Some((w, f)) => (w, Some(f)),
        None => (digits, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.is_none_or(all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uses_comma() {
        assert_eq!(format_skor(72.4), "72,4");
        assert_eq!(format_skor(85.11), "85,11");
        assert_eq!(format_skor(60.0), "60");
    }

    #[test]
    fn test_parse_comma_decimal() {
        assert_eq!(parse_skor("72,4").unwrap(), 72.4);
        assert_eq!(parse_skor(" 60 ").unwrap(), 60.0);
        assert_eq!(parse_skor("-3,5").unwrap(), -3.5);
    }

    #[test]
    fn test_parse_rejects_other_conventions() {
        assert!(parse_skor("72.4").is_err());
        assert!(parse_skor("1.234,5").is_err());
        assert!(parse_skor("72,").is_err());
        assert!(parse_skor(",5").is_err());
        assert!(parse_skor("1e3").is_err());
        assert!(parse_skor("NaN").is_err());
        assert!(parse_skor("").is_err());
    }

    #[test]
    fn test_round_trip() {
        for value in [0.0, 38.3, 59.57, 85.11, 100.0, 169.99] {
            assert_eq!(parse_skor(&format_skor(value)).unwrap(), value);
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(85.106_382_978, 2), 85.11);
        assert_eq!(round_to(38.297_872, 2), 38.3);
        assert_eq!(round_to(59.574_468, 1), 59.6);
    }
}
