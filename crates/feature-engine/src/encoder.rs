//! Feature Encoder
//!
//! Maps human-facing inputs onto the classifier's numeric vector and back.
//! Both directions read the same catalogue, so the encoding of a label and
//! its decoding can never drift apart.

use crate::features::FeatureVector;
use data_validator::{Checked, RawInputs, RawValue, ValidationError, Validator};
use feature_schema::{Domain, FeatureDefinition, InitialValue, FEATURE_COUNT};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

/// A decoded attribute value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    /// Category label of a categorical attribute
    Label(&'static str),
    /// Encoded value of a numeric or boolean-derived attribute
    Number(f64),
}

/// Human-readable rendering of a feature vector
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    fields: Vec<(&'static str, DecodedValue)>,
}

impl DecodedRecord {
    /// Decoded value of an attribute
    pub fn get(&self, name: &str) -> Option<DecodedValue> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Category label of a categorical attribute
    pub fn label(&self, name: &str) -> Option<&'static str> {
        match self.get(name)? {
            DecodedValue::Label(label) => Some(label),
            DecodedValue::Number(_) => None,
        }
    }

    /// (name, value) pairs in catalogue order
    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, DecodedValue)> {
        self.fields.iter()
    }
}

impl Serialize for DecodedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Stateless encoder over the attribute catalogue
///
/// Always bound to the full catalogue, so every vector it produces has one
/// value per declared attribute.
#[derive(Default)]
pub struct FeatureEncoder {
    validator: Validator,
}

impl FeatureEncoder {
    /// Create an encoder over the standard catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode raw inputs into a feature vector
    ///
    /// Every attribute is validated before any value is produced; on error
    /// nothing partial is returned.
    pub fn encode(&self, inputs: &RawInputs) -> Result<FeatureVector, ValidationError> {
        let checked = self.validator.validate_inputs(inputs)?;

        let mut values = [0.0; FEATURE_COUNT];
        for ((slot, def), value) in values
            .iter_mut()
            .zip(self.validator.catalogue())
            .zip(checked)
        {
            *slot = encode_value(def, value);
        }

        debug!(?values, "Encoded feature vector");
        Ok(FeatureVector::from_values(values))
    }

    /// Decode a feature vector back into category labels
    pub fn decode(&self, features: &FeatureVector) -> Result<DecodedRecord, ValidationError> {
        let fields = self
            .validator
            .catalogue()
            .iter()
            .zip(features.values())
            .map(|(def, &value)| decode_value(def, value).map(|v| (def.name, v)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DecodedRecord { fields })
    }

    /// Encode the values an untouched input form shows
    pub fn encode_defaults(&self) -> Result<FeatureVector, ValidationError> {
        self.encode(&default_inputs(self.validator.catalogue()))
    }
}

/// Raw inputs holding every attribute's initial form value
pub fn default_inputs(catalogue: &[FeatureDefinition]) -> RawInputs {
    catalogue
        .iter()
        .map(|def| {
            let value = match def.initial {
                InitialValue::Integer(v) => RawValue::Integer(v),
                InitialValue::Real(v) => RawValue::Real(v),
                InitialValue::Label(l) => RawValue::Label(l.to_string()),
            };
            (def.name, value)
        })
        .collect()
}

fn encode_value(def: &FeatureDefinition, value: Checked) -> f64 {
    match (def.domain, value) {
        (Domain::Threshold { threshold, .. }, Checked::Integer(v)) => {
            if v > threshold {
                1.0
            } else {
                0.0
            }
        }
        (_, Checked::Integer(v)) => v as f64,
        (_, Checked::Real(v)) => v,
        (_, Checked::Category(i)) => i as f64,
    }
}

fn decode_value(def: &FeatureDefinition, value: f64) -> Result<DecodedValue, ValidationError> {
    let Some(labels) = def.labels() else {
        return Ok(DecodedValue::Number(value));
    };

    let max = labels.len() - 1;
    if value.fract() != 0.0 || value < 0.0 || value > max as f64 {
        return Err(ValidationError::IndexOutOfRange {
            field: def.name,
            index: value,
            max,
        });
    }
    Ok(DecodedValue::Label(labels[value as usize]))
}

/// Encode raw inputs with the standard catalogue
pub fn encode(inputs: &RawInputs) -> Result<FeatureVector, ValidationError> {
    FeatureEncoder::default().encode(inputs)
}

/// Decode a feature vector with the standard catalogue
pub fn decode(features: &FeatureVector) -> Result<DecodedRecord, ValidationError> {
    FeatureEncoder::default().decode(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_schema::catalogue;
    use proptest::prelude::*;

    fn scenario_inputs() -> RawInputs {
        RawInputs::new()
            .with("age", 30)
            .with("sex", "Male")
            .with("cp", "Asymptomatic")
            .with("trestbps", 100.0)
            .with("chol", 200)
            .with("fbs", 150)
            .with("restecg", "Normal")
            .with("thalach", 90)
            .with("exang", "No")
            .with("oldpeak", 2.0)
            .with("slope", "Flat")
            .with("ca", 3)
            .with("thal", "Normal")
    }

    #[test]
    fn test_scenario_encoding() {
        let features = encode(&scenario_inputs()).unwrap();
        assert_eq!(
            features.values(),
            &[30.0, 1.0, 3.0, 100.0, 200.0, 1.0, 0.0, 90.0, 0.0, 2.0, 1.0, 3.0, 0.0]
        );
    }

    #[test]
    fn test_fbs_threshold() {
        let at = encode(&scenario_inputs().with("fbs", 120)).unwrap();
        assert_eq!(at.get("fbs"), Some(0.0));

        let above = encode(&scenario_inputs().with("fbs", 121)).unwrap();
        assert_eq!(above.get("fbs"), Some(1.0));
    }

    #[test]
    fn test_unknown_label_rejected() {
        let result = encode(&scenario_inputs().with("cp", "Unknown"));
        assert_eq!(
            result,
            Err(ValidationError::UnknownLabel {
                field: "cp",
                label: "Unknown".into()
            })
        );
    }

    #[test]
    fn test_age_bounds() {
        assert!(encode(&scenario_inputs().with("age", 29)).is_ok());
        assert!(encode(&scenario_inputs().with("age", 77)).is_ok());
        assert!(matches!(
            encode(&scenario_inputs().with("age", 28)),
            Err(ValidationError::OutOfRange { field: "age", .. })
        ));
        assert!(matches!(
            encode(&scenario_inputs().with("age", 78)),
            Err(ValidationError::OutOfRange { field: "age", .. })
        ));
    }

    #[test]
    fn test_missing_field_never_defaulted() {
        let mut inputs = scenario_inputs();
        inputs.remove("exang");
        assert_eq!(encode(&inputs), Err(ValidationError::MissingField("exang")));
    }

    #[test]
    fn test_encoder_covers_full_catalogue() {
        let encoder = FeatureEncoder::new();
        assert_eq!(encoder.validator.catalogue().len(), FEATURE_COUNT);

        // a lone attribute never yields a zero-filled vector
        let inputs = RawInputs::new().with("age", 30);
        assert_eq!(
            encoder.encode(&inputs),
            Err(ValidationError::MissingField("sex"))
        );
    }

    #[test]
    fn test_decode_scenario() {
        let record = decode(&encode(&scenario_inputs()).unwrap()).unwrap();
        assert_eq!(record.label("sex"), Some("Male"));
        assert_eq!(record.label("cp"), Some("Asymptomatic"));
        assert_eq!(record.label("slope"), Some("Flat"));
        assert_eq!(record.get("fbs"), Some(DecodedValue::Number(1.0)));
        assert_eq!(record.label("age"), None);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["thal"], "Normal");
        assert_eq!(json["age"], 30.0);
    }

    #[test]
    fn test_decode_rejects_bad_index() {
        let mut values = *encode(&scenario_inputs()).unwrap().values();
        values[2] = 4.0;
        assert_eq!(
            decode(&FeatureVector::from_values(values)),
            Err(ValidationError::IndexOutOfRange {
                field: "cp",
                index: 4.0,
                max: 3
            })
        );

        values[2] = 1.5;
        assert!(decode(&FeatureVector::from_values(values)).is_err());
        values[2] = -1.0;
        assert!(decode(&FeatureVector::from_values(values)).is_err());
    }

    #[test]
    fn test_encode_defaults() {
        let features = FeatureEncoder::default().encode_defaults().unwrap();
        assert_eq!(features.get("age"), Some(30.0));
        assert_eq!(features.get("sex"), Some(0.0));
        assert_eq!(features.get("fbs"), Some(1.0));
        assert_eq!(features.get("ca"), Some(3.0));
    }

    fn raw_value(def: &'static FeatureDefinition) -> BoxedStrategy<RawValue> {
        match def.domain {
            Domain::IntegerRange { min, max, .. } | Domain::Threshold { min, max, .. } => {
                (min..=max).prop_map(RawValue::Integer).boxed()
            }
            Domain::RealRange { min, max, .. } => (min..=max).prop_map(RawValue::Real).boxed(),
            Domain::Labels { labels } => prop::sample::select(labels)
                .prop_map(|l| RawValue::Label(l.to_string()))
                .boxed(),
        }
    }

    fn raw_inputs() -> impl Strategy<Value = RawInputs> {
        catalogue()
            .iter()
            .map(raw_value)
            .collect::<Vec<_>>()
            .prop_map(|values| catalogue().iter().map(|d| d.name).zip(values).collect())
    }

    proptest! {
        #[test]
        fn prop_decode_restores_labels(inputs in raw_inputs()) {
            let record = decode(&encode(&inputs).unwrap()).unwrap();
            for def in catalogue().iter().filter(|d| d.is_categorical()) {
                let original = match inputs.get(def.name) {
                    Some(RawValue::Label(l)) => l.as_str(),
                    other => panic!("unexpected raw value {:?}", other),
                };
                prop_assert_eq!(record.label(def.name), Some(original));
            }
        }

        #[test]
        fn prop_categories_within_label_range(inputs in raw_inputs()) {
            let features = encode(&inputs).unwrap();
            for def in catalogue().iter().filter(|d| d.is_categorical()) {
                let value = features.get(def.name).unwrap();
                let max = (def.labels().unwrap().len() - 1) as f64;
                prop_assert!(value.fract() == 0.0 && (0.0..=max).contains(&value));
            }
        }

        #[test]
        fn prop_encode_is_deterministic(inputs in raw_inputs()) {
            prop_assert_eq!(encode(&inputs), encode(&inputs));
        }
    }
}
