//! Legacy tensile-strength table reconstruction
//!
//! Stored form, one row per standard/condition:
//!
//! ```text
//! Механические свойства стали 20 /Прокат ГОСТ 1050-88/410;Механические свойства стали 20 /Лист ГОСТ 4041-71/340 - 490;
//! ```
//!
//! Within a row, the header item naming the mechanical properties is
//! noise, an item mentioning ГОСТ is the condition, and the remaining item
//! carries the value in MPa.

use serde::Serialize;

use super::range::{scan_range, ValueRange};
use super::ParseError;

/// Header noise; matched without the first letter so both "Механические"
/// and "механические" rows are recognized
const HEADER_NOISE: &str = "еханические свойства";

/// Substring marking the condition item
const CONDITION_MARKER: &str = "ГОСТ";

/// One reconstructed tensile-strength row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthRow {
    /// Standard/condition the value applies under, e.g. "Прокат ГОСТ 1050-88"
    pub condition: Option<String>,

    /// Tensile strength in MPa
    pub mpa: ValueRange,
}

/// Reconstruct the tensile-strength table from the stored legacy text.
///
/// Rows without a parseable value are dropped; a field yielding no rows is
/// an error. `brand` is only used for error context.
pub fn parse_table(brand: &str, text: &str) -> Result<Vec<StrengthRow>, ParseError> {
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
            if item.is_empty() || item.contains(HEADER_NOISE) {
                continue;
            }
            if item.contains(CONDITION_MARKER) {
                condition = Some(item.to_string());
            } else {
                value = scan_range(item);
            }
        }

        if let Some(mpa) = value {
            rows.push(StrengthRow { condition, mpa });
        }
    }

    if rows.is_empty() {
        return Err(ParseError::NoValues(brand.to_string()));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: &str = "Механические свойства стали 20 /Прокат ГОСТ 1050-88/410;\
         Механические свойства стали 20 /Лист ГОСТ 4041-71/340 - 490;";

    #[test]
    fn test_parse_two_rows() {
        let rows = parse_table("20", FIELD).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].condition.as_deref(), Some("Прокат ГОСТ 1050-88"));
        assert_eq!(rows[0].mpa, ValueRange::single(410.0));
        assert_eq!(rows[1].mpa, ValueRange::new(340.0, 490.0));
    }

    #[test]
    fn test_row_without_value_is_dropped() {
        let rows = parse_table(
            "20",
            "Механические свойства /Прокат ГОСТ 1050-88/410;Прокат ГОСТ 8731-74/;",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_value_without_condition() {
        let rows = parse_table("20", "Механические свойства стали 20 /245 - 390;").unwrap();
        assert_eq!(rows[0].condition, None);
        assert_eq!(rows[0].mpa, ValueRange::new(245.0, 390.0));
    }

    #[test]
    fn test_empty_field_is_error() {
        assert!(matches!(
            parse_table("20", "  ;  "),
            Err(ParseError::NoValues(_))
        ));
    }
}
