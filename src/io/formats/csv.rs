//! CSV line splitting and cell typing.
//!
//! Lines are split positionally on `,`. There is no quoting, escaping or
//! trimming: `a, "b,c"` yields the three cells `a`, ` "b` and `c"`. All
//! splitting goes through [`split_line`], so a quote-aware parser can be
//! substituted in a single place.

use crate::models::FieldValue;

/// Column delimiter.
pub const DELIMITER: char = ',';

/// Splits one CSV line into its cells.
///
/// An empty line yields a single empty cell, matching a row whose only column
/// is blank.
#[must_use]
pub fn split_line(line: &str) -> Vec<&str> {
    line.split(DELIMITER).collect()
}

/// Parses a cell as a double.
///
/// Decimal and exponential notation are accepted, as are the spellings of
/// infinity and NaN. Literals that overflow parse as infinity. Surrounding
/// whitespace is not trimmed, so `" 1"` stays text.
#[must_use]
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok()
}

/// Infers the typed value of a cell: numeric when [`parse_number`] succeeds,
/// otherwise the raw text.
#[must_use]
pub fn infer_value(cell: &str) -> FieldValue {
    parse_number(cell).map_or_else(|| FieldValue::Text(cell.to_string()), FieldValue::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a,b", &["a", "b"]; "simple")]
    #[test_case(",y", &["", "y"]; "leading empty")]
    #[test_case("x,", &["x", ""]; "trailing empty is kept")]
    #[test_case("", &[""]; "empty line")]
    #[test_case(" a , b ", &[" a ", " b "]; "no trimming")]
    #[test_case(r#""q,r""#, &[r#""q"#, r#"r""#]; "quotes are not special")]
    fn test_split_line(line: &str, expected: &[&str]) {
        assert_eq!(split_line(line), expected);
    }

    #[test_case("1", Some(1.0); "integer")]
    #[test_case("-2.5", Some(-2.5); "negative decimal")]
    #[test_case("1e3", Some(1000.0); "exponent")]
    #[test_case(".5", Some(0.5); "leading dot")]
    #[test_case("", None; "empty cell")]
    #[test_case(" 1", None; "surrounding whitespace")]
    #[test_case("abc", None; "word")]
    #[test_case("inf", Some(f64::INFINITY); "infinity spelling")]
    #[test_case("-infinity", Some(f64::NEG_INFINITY); "negative infinity spelling")]
    #[test_case("1e400", Some(f64::INFINITY); "overflow")]
    fn test_parse_number(cell: &str, expected: Option<f64>) {
        assert_eq!(parse_number(cell), expected);
    }

    #[test]
    fn test_nan_is_numeric() {
        assert!(parse_number("NaN").is_some_and(f64::is_nan));
        assert!(infer_value("nan").as_number().is_some_and(f64::is_nan));
    }

    #[test]
    fn test_infer_value() {
        assert_eq!(infer_value("3.5"), FieldValue::Number(3.5));
        assert_eq!(infer_value("x"), FieldValue::Text("x".to_string()));
        assert_eq!(infer_value(""), FieldValue::Text(String::new()));
    }
}
