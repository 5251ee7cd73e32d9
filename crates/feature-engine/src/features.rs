//! Feature Vector

use data_validator::ValidationError;
use feature_schema::{catalogue, position, FEATURE_COUNT};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Fixed-order numeric encoding of all clinical attributes
///
/// Slot `i` always holds the attribute at catalogue position `i`. Built fresh
/// per prediction and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Wrap values that are already in catalogue order
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Encoded value of an attribute
    pub fn get(&self, name: &str) -> Option<f64> {
        position(name).map(|i| self.values[i])
    }

    /// Values in catalogue order
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// (name, value) pairs in catalogue order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        catalogue()
            .iter()
            .zip(self.values.iter())
            .map(|(def, &v)| (def.name, v))
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, f64>> for FeatureVector {
    type Error = ValidationError;

    fn try_from(mut named: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, def) in values.iter_mut().zip(catalogue()) {
            *slot = named
                .remove(def.name)
                .ok_or(ValidationError::MissingField(def.name))?;
        }
        if let Some(extra) = named.into_keys().next() {
            return Err(ValidationError::UnknownField(extra));
        }
        Ok(Self { values })
    }
}
