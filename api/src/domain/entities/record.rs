//! Raw record domain entity
//!
//! One row of the source table: an unordered mapping from field name to value.
//! Lookups go through typed helpers that carry the default for a missing or
//! unusable value, so callers never match on the raw shape themselves.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::Score;

/// A single cell value as returned by the data source
///
/// Variant order matters for untagged deserialization: numbers are tried
/// before text, and anything unrecognised (null, objects) lands in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Bool(bool),
    List(Vec<FieldValue>),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Text view of the value, if it has a sensible one
    ///
    /// Numbers render the way `f64` displays them (`42.0` becomes `"42"`).
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric view of the value, if it parses as a finite number
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// A record fetched from the data source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    /// Source record id, when the source provides one
    pub id: Option<String>,
    /// Source creation timestamp, kept verbatim
    pub created_time: Option<String>,
    fields: BTreeMap<String, FieldValue>,
}

impl RawRecord {
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Self {
            id: None,
            created_time: None,
            fields,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Text of `field`, or `default` when absent or not text-like
    pub fn text_or(&self, field: &str, default: &str) -> String {
        self.get(field)
            .and_then(FieldValue::as_text)
            .unwrap_or_else(|| default.to_string())
    }

    /// Numeric value of `field`; anything non-numeric counts as zero
    pub fn score(&self, field: &str) -> Score {
        Score::coerce(self.get(field))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Which source fields feed which leaderboard attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    pub name: String,
    pub category: String,
    pub score: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
            category: "Firm".to_string(),
            score: "Referral Earned".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_field_values() {
        let json = r#"{"a": 12.5, "b": "text", "c": true, "d": [1, "x"], "e": null, "f": {"k": 1}}"#;
        let fields: BTreeMap<String, FieldValue> = serde_json::from_str(json).unwrap();

        assert_eq!(fields["a"], FieldValue::Number(12.5));
        assert_eq!(fields["b"], FieldValue::Text("text".to_string()));
        assert_eq!(fields["c"], FieldValue::Bool(true));
        assert_eq!(
            fields["d"],
            FieldValue::List(vec![FieldValue::Number(1.0), FieldValue::Text("x".into())])
        );
        assert_eq!(fields["e"], FieldValue::Other(serde_json::Value::Null));
        assert!(matches!(fields["f"], FieldValue::Other(_)));
    }

    #[test]
    fn text_or_uses_default_for_missing_field() {
        let record: RawRecord = [("Firm", "Acme")].into_iter().collect();

        assert_eq!(record.text_or("Name", ""), "");
        assert_eq!(record.text_or("Firm", ""), "Acme");
    }

    #[test]
    fn text_or_renders_numbers() {
        let record: RawRecord = [("Name", 42.0)].into_iter().collect();
        assert_eq!(record.text_or("Name", ""), "42");
    }

    #[test]
    fn text_or_ignores_non_text_shapes() {
        let mut fields = BTreeMap::new();
        fields.insert("Name".to_string(), FieldValue::Bool(true));
        fields.insert("Firm".to_string(), FieldValue::List(vec![]));
        let record = RawRecord::new(fields);

        assert_eq!(record.text_or("Name", "?"), "?");
        assert_eq!(record.text_or("Firm", ""), "");
    }

    #[test]
    fn as_number_parses_text() {
        assert_eq!(FieldValue::from(" 250.75 ").as_number(), Some(250.75));
        assert_eq!(FieldValue::from("1e3").as_number(), Some(1000.0));
        assert_eq!(FieldValue::from("N/A").as_number(), None);
        assert_eq!(FieldValue::from("").as_number(), None);
        assert_eq!(FieldValue::from("$1,000").as_number(), None);
    }

    #[test]
    fn as_number_rejects_non_finite() {
        assert_eq!(FieldValue::from("inf").as_number(), None);
        assert_eq!(FieldValue::from("NaN").as_number(), None);
        assert_eq!(FieldValue::Number(f64::INFINITY).as_number(), None);
    }

    #[test]
    fn field_names_are_sorted() {
        let record: RawRecord = [("b", "1"), ("a", "2")].into_iter().collect();
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn default_field_map() {
        let map = FieldMap::default();
        assert_eq!(map.name, "Name");
        assert_eq!(map.category, "Firm");
        assert_eq!(map.score, "Referral Earned");
    }
}
