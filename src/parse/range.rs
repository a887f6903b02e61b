//! Numeric range extraction from legacy strings
//!
//! Accepted spellings: "126 - 178", "126-178", a single number, and the
//! comma form "2, 5.6" used by some chemical-composition cells.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::ParseError;

/// "140 - 300" or "140-300", up to 4 integer digits per bound
static RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,4}(?:\.\d+)?)\s*-\s*(\d{1,4}(?:\.\d+)?)").unwrap());

/// A bare number
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,4}(?:\.\d+)?").unwrap());

/// An inclusive numeric range; a single value has `min == max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn single(v: f64) -> Self {
        Self { min: v, max: v }
    }

    pub fn is_single(&self) -> bool {
        self.min == self.max
    }

    pub fn mean(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl std::fmt::Display for ValueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} - {}", self.min, self.max)
        }
    }
}

/// Find the first numeric range (or bare number) inside noisy text.
///
/// Used on value items already stripped of their unit markers; prose
/// around the numbers is ignored.
pub fn scan_range(text: &str) -> Option<ValueRange> {
    if let Some(caps) = RANGE_RE.captures(text) {
        let min: f64 = caps[1].parse().ok()?;
        let max: f64 = caps[2].parse().ok()?;
        return Some(ValueRange::new(min, max));
    }
    NUMBER_RE
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .map(ValueRange::single)
}

/// Parse a string that should be exactly a range.
///
/// Unlike [`scan_range`], the whole input must be one of the accepted
/// spellings; anything else is an error.
pub fn parse_range(text: &str) -> Result<ValueRange, ParseError> {
    let text = text.trim();
    if let Ok(v) = text.parse::<f64>() {
        return Ok(ValueRange::single(v));
    }

    let bad = || ParseError::BadRange(text.to_string());
    let has_dash = text.contains('-');
    let has_comma = text.contains(',');

    let (a, b) = match (has_dash, has_comma) {
        (true, true) | (false, false) => return Err(bad()),
        (true, false) => text.split_once('-').ok_or_else(bad)?,
        (false, true) => text.split_once(',').ok_or_else(bad)?,
    };

    let min: f64 = a.trim().parse().map_err(|_| bad())?;
    let max: f64 = b.trim().parse().map_err(|_| bad())?;
    Ok(ValueRange::new(min, max))
}

/// Mean over the row means of a parsed table, rounded to 6 decimals.
pub fn mean_of(ranges: &[ValueRange]) -> Option<f64> {
    if ranges.is_empty() {
        return None;
    }
    let sum: f64 = ranges.iter().map(ValueRange::mean).sum();
    Some(round6(sum / ranges.len() as f64))
}

fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_spaced_range() {
        assert_eq!(scan_range("140 - 300"), Some(ValueRange::new(140.0, 300.0)));
    }

    #[test]
    fn test_scan_unspaced_range() {
        assert_eq!(scan_range("126-178"), Some(ValueRange::new(126.0, 178.0)));
    }

    #[test]
    fn test_scan_single_number() {
        assert_eq!(scan_range("143"), Some(ValueRange::single(143.0)));
    }

    #[test]
    fn test_scan_ignores_surrounding_prose() {
        let r = scan_range("not less than 410 after rolling").unwrap();
        assert_eq!(r, ValueRange::single(410.0));
    }

    #[test]
    fn test_scan_nothing() {
        assert_eq!(scan_range("нет данных"), None);
    }

    #[test]
    fn test_parse_strict_forms() {
        assert_eq!(parse_range("2.3-2.9").unwrap(), ValueRange::new(2.3, 2.9));
        assert_eq!(parse_range("2, 5.6").unwrap(), ValueRange::new(2.0, 5.6));
        assert_eq!(parse_range("7").unwrap(), ValueRange::single(7.0));
    }

    #[test]
    fn test_parse_rejects_mixed_separators() {
        assert!(matches!(
            parse_range("2,3-2,9"),
            Err(ParseError::BadRange(_))
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_range("a-b").is_err());
        assert!(parse_range("").is_err());
    }

    #[test]
    fn test_range_normalizes_order() {
        assert_eq!(ValueRange::new(300.0, 140.0).min, 140.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(ValueRange::new(140.0, 300.0).mean(), 220.0);
        let rows = [ValueRange::new(100.0, 200.0), ValueRange::single(300.0)];
        assert_eq!(mean_of(&rows), Some(225.0));
        assert_eq!(mean_of(&[]), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ValueRange::new(126.0, 178.0).to_string(), "126 - 178");
        assert_eq!(ValueRange::single(143.0).to_string(), "143");
    }
}
