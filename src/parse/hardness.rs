//! Legacy hardness table reconstruction
//!
//! Stored form, one row per delivery condition:
//!
//! ```text
//! Твердость 20 горячекатанного, /HB 10 -1 = 143 МПа; Твердость 20 ,/HB 10 -1 = 163 МПа;
//! ```
//!
//! Within a row, the item carrying `HB 10 -1` is the value and the item
//! carrying the brand is the condition description.

use serde::Serialize;

use super::range::{scan_range, ValueRange};
use super::ParseError;

/// Marker preceding the hardness value (Brinell, 10 mm ball, HB 10-1 scale)
const VALUE_MARKER: &str = "HB 10 -1";

/// Unit suffix stripped from value items
const UNIT: &str = "МПа";

/// Noise word stripped from condition items
const CONDITION_NOISE: &str = "Твердость";

/// One reconstructed hardness row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardnessRow {
    /// Delivery condition, e.g. "горячекатанного"; `None` when the row
    /// describes the material generically
    pub condition: Option<String>,

    /// Hardness in MPa
    pub mpa: ValueRange,
}

/// Reconstruct the hardness table from the stored legacy text.
///
/// Rows without a parseable value are dropped; a field yielding no rows at
/// all is an error. An item that is neither a value nor mentions the brand
/// means the field does not follow the legacy encoding.
pub fn parse_table(brand: &str, text: &str) -> Result<Vec<HardnessRow>, ParseError> {
    let mut rows = Vec::new();

    for raw_row in text.split(';') {
        let row = raw_row.trim();
        if row.is_empty() {
            continue;
        }

        let mut condition = None;
        let mut value = None;

        for raw_item in row.split('/') {
            let item = raw_item.trim();
            if item.is_empty() {
                continue;
            }
            if item.contains(VALUE_MARKER) {
                value = scan_range(&strip_value_markers(item));
            } else if item.contains(brand) {
                condition = condition_text(brand, item);
            } else {
                return Err(ParseError::UnexpectedToken(item.to_string()));
            }
        }

        if let Some(mpa) = value {
            rows.push(HardnessRow { condition, mpa });
        }
    }

    if rows.is_empty() {
        return Err(ParseError::NoValues(brand.to_string()));
    }
    Ok(rows)
}

/// "HB 10 -1 = 140 - 300 МПа" -> "140 - 300"
fn strip_value_markers(item: &str) -> String {
    item.replace(VALUE_MARKER, "")
        .replace('=', "")
        .replace(UNIT, "")
        .trim()
        .to_string()
}

/// Strip the noise word and the brand from a condition item; an item that
/// carries nothing else describes the material generically.
fn condition_text(brand: &str, item: &str) -> Option<String> {
    let text = item.replace(CONDITION_NOISE, "").replace(brand, "");
    let text = text.trim().trim_matches(',').trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: &str =
        "Твердость 20 горячекатанного, /HB 10 -1 = 143 МПа; Твердость 20 ,/HB 10 -1 = 163 МПа;";

    #[test]
    fn test_parse_two_rows() {
        let rows = parse_table("20", FIELD).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].condition.as_deref(), Some("горячекатанного"));
        assert_eq!(rows[0].mpa, ValueRange::single(143.0));
        assert_eq!(rows[1].condition, None);
        assert_eq!(rows[1].mpa, ValueRange::single(163.0));
    }

    #[test]
    fn test_parse_range_value() {
        let rows = parse_table("30ХМА", "Твердость 30ХМА ,/HB 10 -1 = 140 - 300 МПа;").unwrap();
        assert_eq!(rows[0].mpa, ValueRange::new(140.0, 300.0));
    }

    #[test]
    fn test_rows_without_value_are_dropped() {
        // Second row lacks the HB marker item entirely
        let rows = parse_table("20", "Твердость 20 ,/HB 10 -1 = 163 МПа;Твердость 20 ,;").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_empty_field_is_error() {
        assert!(matches!(
            parse_table("20", ";"),
            Err(ParseError::NoValues(_))
        ));
    }

    #[test]
    fn test_foreign_text_is_error() {
        assert!(matches!(
            parse_table("20", "some unrelated text"),
            Err(ParseError::UnexpectedToken(_))
        ));
    }

    #[test]
    fn test_trailing_semicolon_tolerated() {
        let rows = parse_table("20", "Твердость 20 ,/HB 10 -1 = 163 МПа;").unwrap();
        assert_eq!(rows.len(), 1);
    }
}
