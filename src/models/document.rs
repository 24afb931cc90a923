//! Documents and typed field values.

use super::TagId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a single document field.
///
/// The variant is fixed when the field is created and never re-coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// Double-precision number, possibly infinite or NaN.
    Number(#[serde(with = "number_repr")] f64),
    /// Raw text.
    Text(String),
}

impl FieldValue {
    /// Returns the number if this is a numeric value.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns the text if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

/// JSON has no literal for infinity or NaN, so those are written as the
/// string tokens `"inf"`, `"-inf"` and `"NaN"`.
mod number_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Token(String),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if n.is_finite() {
            serializer.serialize_f64(*n)
        } else {
            serializer.serialize_str(&n.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Token(token) => token.parse::<f64>().map_err(serde::de::Error::custom),
        }
    }
}

/// Numbers use the shortest decimal form that round-trips (`3.5`, `1`, `0.1`).
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A named field within a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name; may be empty for text fields imported from unlabelled columns.
    pub name: String,
    /// Typed value.
    pub value: FieldValue,
}

/// A record of named, typed fields with attached tag identifiers.
///
/// Fields keep their insertion order. Setting a name that already exists
/// replaces the value in place, so the field keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    fields: Vec<Field>,
    tags: Vec<TagId>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any existing field with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.value = value,
            None => self.fields.push(Field { name, value }),
        }
    }

    /// Builder form of [`Document::set`].
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Replaces the attached tag identifiers.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<TagId>) -> Self {
        self.tags = tags;
        self
    }

    /// Returns the value of the named field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Returns all fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the attached tag identifiers in attachment order.
    #[must_use]
    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the document has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_in_place() {
        let doc = Document::new()
            .with_field("a", 1.0)
            .with_field("b", "x")
            .with_field("a", "late");

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.fields()[0].name, "a");
        assert_eq!(doc.get("a"), Some(&FieldValue::Text("late".to_string())));
    }

    #[test]
    fn test_number_display() {
        assert_eq!(FieldValue::Number(3.5).to_string(), "3.5");
        assert_eq!(FieldValue::Number(1.0).to_string(), "1");
        assert_eq!(FieldValue::Number(-0.25).to_string(), "-0.25");
        assert_eq!(FieldValue::Text("hello".to_string()).to_string(), "hello");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(FieldValue::Number(2.0).as_number(), Some(2.0));
        assert_eq!(FieldValue::Number(2.0).as_text(), None);
        assert_eq!(FieldValue::from("t").as_text(), Some("t"));
    }

    #[test]
    fn test_fields_round_trip_through_json() {
        let doc = Document::new()
            .with_field("n", 1.5)
            .with_field("", "blank")
            .with_tags(TagId::new(4).into_iter().collect());

        let json = serde_json::to_string(&doc).unwrap_or_default();
        assert!(json.contains(r#"{"name":"n","value":{"number":1.5}}"#));

        let parsed: Document = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_non_finite_numbers_survive_json() {
        let doc = Document::new()
            .with_field("up", f64::INFINITY)
            .with_field("down", f64::NEG_INFINITY)
            .with_field("nan", f64::NAN);

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains(r#"{"number":"inf"}"#));
        assert!(json.contains(r#"{"number":"-inf"}"#));
        assert!(json.contains(r#"{"number":"NaN"}"#));

        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.get("up"), Some(&FieldValue::Number(f64::INFINITY)));
        assert_eq!(parsed.get("down"), Some(&FieldValue::Number(f64::NEG_INFINITY)));
        assert!(parsed.get("nan").and_then(FieldValue::as_number).is_some_and(f64::is_nan));
    }

    #[test]
    fn test_unknown_number_token_is_rejected() {
        let parsed: Result<FieldValue, _> = serde_json::from_str(r#"{"number":"lots"}"#);
        assert!(parsed.is_err());
    }
}
