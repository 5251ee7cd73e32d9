//! Raw Input Values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One human-facing input value, as collected by the input surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Real(f64),
    Label(String),
}

impl RawValue {
    /// Short name of the value's shape, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Integer(_) => "integer",
            RawValue::Real(_) => "real",
            RawValue::Label(_) => "label",
        }
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Integer(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Integer(v as i64)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Real(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Label(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Label(v)
    }
}

/// Raw values keyed by attribute name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInputs(BTreeMap<String, RawValue>);

impl RawInputs {
    /// Create an empty set of inputs
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Remove a value
    pub fn remove(&mut self, name: &str) -> Option<RawValue> {
        self.0.remove(name)
    }

    /// Get a value by attribute name
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.0.get(name)
    }

    /// Attribute names present, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shapes() {
        let inputs: RawInputs =
            serde_json::from_str(r#"{"age": 30, "trestbps": 100.5, "sex": "Male"}"#).unwrap();
        assert_eq!(inputs.get("age"), Some(&RawValue::Integer(30)));
        assert_eq!(inputs.get("trestbps"), Some(&RawValue::Real(100.5)));
        assert_eq!(inputs.get("sex"), Some(&RawValue::Label("Male".into())));
        assert_eq!(inputs.len(), 3);
    }

    #[test]
    fn test_builder() {
        let inputs = RawInputs::new().with("ca", 3).with("oldpeak", 2.0).with("thal", "Normal");
        assert_eq!(inputs.names().collect::<Vec<_>>(), ["ca", "oldpeak", "thal"]);
        assert_eq!(inputs.get("ca").unwrap().type_name(), "integer");
    }
}
