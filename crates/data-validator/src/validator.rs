//! Domain Validator for Raw Inputs

use crate::error::ValidationError;
use crate::raw::{RawInputs, RawValue};
use feature_schema::{Domain, FeatureDefinition};
use tracing::{debug, warn};

/// A raw value that passed its domain check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Checked {
    /// Value of an integer-range or threshold attribute
    Integer(i64),
    /// Value of a real-range attribute
    Real(f64),
    /// Position of a category label
    Category(usize),
}

/// Result of validating a full set of inputs
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }
}

/// Validator for raw inputs against the attribute catalogue
pub struct Validator {
    catalogue: &'static [FeatureDefinition],
}

impl Validator {
    /// Create a validator over a catalogue
    pub fn new(catalogue: &'static [FeatureDefinition]) -> Self {
        Self { catalogue }
    }

    /// Catalogue this validator checks against
    pub fn catalogue(&self) -> &'static [FeatureDefinition] {
        self.catalogue
    }

    /// Validate a single value against an inclusive range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() || value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate one raw value against its definition's domain
    pub fn validate(
        &self,
        def: &FeatureDefinition,
        raw: &RawValue,
    ) -> Result<Checked, ValidationError> {
        match def.domain {
            Domain::IntegerRange { min, max, .. } | Domain::Threshold { min, max, .. } => {
                let value = self.integer_value(def, raw)?;
                if value < min || value > max {
                    return Err(ValidationError::OutOfRange {
                        field: def.name,
                        value: value as f64,
                        min: min as f64,
                        max: max as f64,
                    });
                }
                Ok(Checked::Integer(value))
            }
            Domain::RealRange { min, max, .. } => {
                let value = match raw {
                    RawValue::Integer(v) => *v as f64,
                    RawValue::Real(v) => *v,
                    RawValue::Label(_) => return Err(type_mismatch(def, "a real number", raw)),
                };
                self.validate_range(def.name, value, (min, max))?;
                Ok(Checked::Real(value))
            }
            Domain::Labels { labels } => match raw {
                RawValue::Label(label) => labels
                    .iter()
                    .position(|l| l == label)
                    .map(Checked::Category)
                    .ok_or_else(|| ValidationError::UnknownLabel {
                        field: def.name,
                        label: label.clone(),
                    }),
                _ => Err(type_mismatch(def, "a category label", raw)),
            },
        }
    }

    /// Validate every attribute in catalogue order, stopping at the first error
    pub fn validate_inputs(&self, inputs: &RawInputs) -> Result<Vec<Checked>, ValidationError> {
        self.reject_unknown(inputs)?;

        let checked = self
            .catalogue
            .iter()
            .map(|def| {
                let raw = inputs
                    .get(def.name)
                    .ok_or(ValidationError::MissingField(def.name))?;
                self.validate(def, raw)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                warn!(field = e.field(), "Rejected input: {}", e);
                e
            })?;

        debug!("Validated {} fields", checked.len());
        Ok(checked)
    }

    /// Validate every attribute and collect all errors
    pub fn check_all(&self, inputs: &RawInputs) -> ValidationResult {
        let mut errors: Vec<ValidationError> = inputs
            .names()
            .filter(|name| !self.catalogue.iter().any(|d| d.name == *name))
            .map(|name| ValidationError::UnknownField(name.to_string()))
            .collect();

        for def in self.catalogue {
            let outcome = match inputs.get(def.name) {
                Some(raw) => self.validate(def, raw).map(|_| ()),
                None => Err(ValidationError::MissingField(def.name)),
            };
            if let Err(e) = outcome {
                errors.push(e);
            }
        }

        let fields_checked = self.catalogue.len();
        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            ValidationResult::invalid(errors, fields_checked)
        }
    }

    fn reject_unknown(&self, inputs: &RawInputs) -> Result<(), ValidationError> {
        match inputs
            .names()
            .find(|name| !self.catalogue.iter().any(|d| d.name == *name))
        {
            Some(name) => Err(ValidationError::UnknownField(name.to_string())),
            None => Ok(()),
        }
    }

    fn integer_value(
        &self,
        def: &FeatureDefinition,
        raw: &RawValue,
    ) -> Result<i64, ValidationError> {
        match raw {
            RawValue::Integer(v) => Ok(*v),
            RawValue::Real(v) if v.is_finite() && v.fract() == 0.0 => Ok(*v as i64),
            _ => Err(type_mismatch(def, "an integer", raw)),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(feature_schema::catalogue())
    }
}

fn type_mismatch(
    def: &FeatureDefinition,
    expected: &'static str,
    raw: &RawValue,
) -> ValidationError {
    ValidationError::TypeMismatch {
        field: def.name,
        expected,
        actual: raw.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_schema::definition;
    use proptest::prelude::*;

    fn valid_inputs() -> RawInputs {
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
    fn test_age_boundaries() {
        let validator = Validator::default();
        let age = definition("age").unwrap();
        assert!(validator.validate(age, &RawValue::Integer(29)).is_ok());
        assert!(validator.validate(age, &RawValue::Integer(77)).is_ok());
        assert!(matches!(
            validator.validate(age, &RawValue::Integer(28)),
            Err(ValidationError::OutOfRange { field: "age", .. })
        ));
        assert!(validator.validate(age, &RawValue::Integer(78)).is_err());
    }

    #[test]
    fn test_integer_accepts_whole_reals_only() {
        let validator = Validator::default();
        let chol = definition("chol").unwrap();
        assert_eq!(
            validator.validate(chol, &RawValue::Real(200.0)),
            Ok(Checked::Integer(200))
        );
        assert!(matches!(
            validator.validate(chol, &RawValue::Real(200.5)),
            Err(ValidationError::TypeMismatch { field: "chol", .. })
        ));
    }

    #[test]
    fn test_real_range() {
        let validator = Validator::default();
        let oldpeak = definition("oldpeak").unwrap();
        assert_eq!(
            validator.validate(oldpeak, &RawValue::Integer(6)),
            Ok(Checked::Real(6.0))
        );
        assert!(validator.validate(oldpeak, &RawValue::Real(6.01)).is_err());
        assert!(validator.validate(oldpeak, &RawValue::Real(f64::NAN)).is_err());
    }

    #[test]
    fn test_labels() {
        let validator = Validator::default();
        let cp = definition("cp").unwrap();
        assert_eq!(
            validator.validate(cp, &RawValue::Label("Asymptomatic".into())),
            Ok(Checked::Category(3))
        );
        assert_eq!(
            validator.validate(cp, &RawValue::Label("Unknown".into())),
            Err(ValidationError::UnknownLabel {
                field: "cp",
                label: "Unknown".into()
            })
        );
        assert!(matches!(
            validator.validate(cp, &RawValue::Integer(3)),
            Err(ValidationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_and_unknown_fields() {
        let validator = Validator::default();

        let mut inputs = valid_inputs();
        inputs.remove("thal");
        assert_eq!(
            validator.validate_inputs(&inputs),
            Err(ValidationError::MissingField("thal"))
        );

        let inputs = valid_inputs().with("bmi", 22.0);
        assert_eq!(
            validator.validate_inputs(&inputs),
            Err(ValidationError::UnknownField("bmi".into()))
        );
    }

    #[test]
    fn test_check_all_collects_every_error() {
        let validator = Validator::default();
        let mut inputs = valid_inputs().with("age", 100).with("cp", "Unknown");
        inputs.remove("ca");

        let result = validator.check_all(&inputs);
        assert!(!result.valid);
        assert_eq!(result.fields_checked, 13);
        let fields: Vec<_> = result.errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, ["age", "cp", "ca"]);

        assert!(validator.check_all(&valid_inputs()).valid);
    }

    proptest! {
        #[test]
        fn prop_age_in_range_iff_accepted(age in 0i64..150) {
            let validator = Validator::default();
            let def = definition("age").unwrap();
            let accepted = validator.validate(def, &RawValue::Integer(age)).is_ok();
            prop_assert_eq!(accepted, (29..=77).contains(&age));
        }
    }
}
