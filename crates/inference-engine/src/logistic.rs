//! Logistic Regression Model
//!
//! The model artifact is a JSON document exported from the training notebook:
//!
//! ```json
//! { "feature_names": ["age", ...], "coefficients": [0.01, ...], "intercept": 0.3 }
//! ```

use crate::classifier::{Classifier, Diagnosis, Prediction};
use crate::InferenceError;
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

fn default_threshold() -> f64 {
    0.5
}

/// Binary logistic regression over the encoded feature vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
    /// Probability above which the positive class is predicted
    #[serde(default = "default_threshold")]
    threshold: f64,
}

impl LogisticRegression {
    /// Create a model from its parameters
    pub fn new(
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, InferenceError> {
        let model = Self {
            feature_names,
            coefficients,
            intercept,
            threshold: default_threshold(),
        };
        model.check()?;
        Ok(model)
    }

    /// Parse a model from JSON
    pub fn from_json(json: &str) -> Result<Self, InferenceError> {
        let model: Self = serde_json::from_str(json)
            .map_err(|e| InferenceError::ModelLoadError(format!("Invalid model JSON: {}", e)))?;
        model.check()?;
        Ok(model)
    }

    /// Load a model file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
        })?;
        let model = Self::from_json(&json)?;
        info!(
            "Loaded logistic regression from {} ({} features)",
            path.display(),
            model.coefficients.len()
        );
        Ok(model)
    }

    /// Override the decision threshold
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, InferenceError> {
        self.threshold = threshold;
        self.check()?;
        Ok(self)
    }

    /// Probability of the positive class
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.values())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        1.0 / (1.0 + (-z).exp())
    }

    fn check(&self) -> Result<(), InferenceError> {
        if self.coefficients.len() != self.feature_names.len() {
            return Err(InferenceError::ModelLoadError(format!(
                "{} coefficients for {} features",
                self.coefficients.len(),
                self.feature_names.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(InferenceError::ModelLoadError(
                "Model parameters must be finite".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(InferenceError::ModelLoadError(format!(
                "Threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn feature_names(&self) -> Vec<String> {
        self.feature_names.clone()
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        if self.coefficients.len() != features.len() {
            return Err(InferenceError::SchemaMismatch {
                expected: self.feature_names.join(", "),
                actual: features.iter().map(|(n, _)| n).collect::<Vec<_>>().join(", "),
            });
        }

        let probability = self.probability(features);
        let diagnosis = if probability > self.threshold {
            Diagnosis::HeartDisease
        } else {
            Diagnosis::NoHeartDisease
        };

        Ok(Prediction {
            diagnosis,
            probability: Some(probability),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_schema::{feature_names, FEATURE_COUNT};
    use proptest::prelude::*;

    fn names() -> Vec<String> {
        feature_names().map(String::from).collect()
    }

    #[test]
    fn test_zero_weights_give_intercept_probability() {
        let model = LogisticRegression::new(names(), vec![0.0; FEATURE_COUNT], 0.0).unwrap();
        let features = FeatureVector::from_values([1.0; FEATURE_COUNT]);
        let prediction = model.predict(&features).unwrap();
        assert!((prediction.probability.unwrap() - 0.5).abs() < 1e-12);
        // Exactly at the threshold is not a positive
        assert_eq!(prediction.diagnosis, Diagnosis::NoHeartDisease);
    }

    #[test]
    fn test_positive_weight_on_chest_pain() {
        let mut weights = vec![0.0; FEATURE_COUNT];
        weights[2] = 2.0;
        let model = LogisticRegression::new(names(), weights, -3.0).unwrap();

        let mut values = [0.0; FEATURE_COUNT];
        values[2] = 3.0;
        let high = model.predict(&FeatureVector::from_values(values)).unwrap();
        assert_eq!(high.diagnosis, Diagnosis::HeartDisease);

        values[2] = 0.0;
        let low = model.predict(&FeatureVector::from_values(values)).unwrap();
        assert_eq!(low.diagnosis, Diagnosis::NoHeartDisease);
        assert!(low.probability.unwrap() < high.probability.unwrap());
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({
            "feature_names": names(),
            "coefficients": vec![0.1; FEATURE_COUNT],
            "intercept": -1.0,
        })
        .to_string();
        let model = LogisticRegression::from_json(&json).unwrap();
        assert_eq!(model.threshold, 0.5);
        assert_eq!(model.feature_names().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_rejects_malformed_models() {
        assert!(LogisticRegression::new(names(), vec![0.0; 3], 0.0).is_err());
        assert!(LogisticRegression::new(names(), vec![f64::NAN; FEATURE_COUNT], 0.0).is_err());
        assert!(LogisticRegression::from_json("{}").is_err());

        let model = LogisticRegression::new(names(), vec![0.0; FEATURE_COUNT], 0.0).unwrap();
        assert!(model.with_threshold(1.5).is_err());
    }

    proptest! {
        #[test]
        fn test_diagnosis_follows_threshold(
            weights in prop::collection::vec(-5.0f64..5.0, FEATURE_COUNT),
            values in prop::array::uniform13(-300.0f64..300.0),
            intercept in -10.0f64..10.0,
            threshold in 0.0f64..=1.0,
        ) {
            let model = LogisticRegression::new(names(), weights, intercept)
                .unwrap()
                .with_threshold(threshold)
                .unwrap();
            let prediction = model.predict(&FeatureVector::from_values(values)).unwrap();
            let p = prediction.probability.unwrap();

            prop_assert!((0.0..=1.0).contains(&p));
            prop_assert_eq!(prediction.diagnosis == Diagnosis::HeartDisease, p > threshold);
        }
    }
}
