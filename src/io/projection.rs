//! Field projection for export.

use crate::models::{Document, FieldValue};

/// Selects the fields of `document` to render.
///
/// With an empty whitelist every field is returned in insertion order.
/// Otherwise the whitelisted names are returned in whitelist order; names the
/// document does not have are skipped.
#[must_use]
pub fn project<'a>(document: &'a Document, whitelist: &[String]) -> Vec<(&'a str, &'a FieldValue)> {
    if whitelist.is_empty() {
        return document
            .fields()
            .iter()
            .map(|field| (field.name.as_str(), &field.value))
            .collect();
    }

    whitelist
        .iter()
        .filter_map(|name| {
            document
                .fields()
                .iter()
                .find(|field| &field.name == name)
                .map(|field| (field.name.as_str(), &field.value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new()
            .with_field("x", 3.5)
            .with_field("y", "hello")
            .with_field("z", 7.0)
    }

    fn names(projected: &[(&str, &FieldValue)]) -> Vec<String> {
        projected.iter().map(|(n, _)| (*n).to_string()).collect()
    }

    #[test]
    fn test_empty_whitelist_yields_all_in_order() {
        let doc = sample();
        assert_eq!(names(&project(&doc, &[])), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_whitelist_order_wins() {
        let doc = sample();
        let whitelist = vec!["z".to_string(), "x".to_string()];
        assert_eq!(names(&project(&doc, &whitelist)), vec!["z", "x"]);
    }

    #[test]
    fn test_missing_names_are_skipped() {
        let doc = sample();
        let whitelist = vec!["missing".to_string(), "y".to_string()];
        let projected = project(&doc, &whitelist);
        assert_eq!(names(&projected), vec!["y"]);
        assert_eq!(projected[0].1, &FieldValue::from("hello"));
    }
}
