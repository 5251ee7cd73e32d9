//! Inference Engine Implementation

use crate::classifier::{Classifier, Prediction};
use crate::logistic::LogisticRegression;
use crate::InferenceError;
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// On-disk format of the model artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// Logistic regression parameters as JSON
    #[default]
    Json,
    /// ONNX graph, run with tract
    Onnx,
}

/// Description of the loaded model
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub kind: &'static str,
    pub path: Option<String>,
    pub feature_count: usize,
}

/// Result of inference operation
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// The prediction
    pub prediction: Prediction,
    /// Inference latency in microseconds
    pub latency_us: u64,
}

/// Read-only handle to the classifier
///
/// Built once at startup and shared by cloning; the model itself is never
/// mutated after construction.
#[derive(Clone)]
pub struct InferenceEngine {
    classifier: Arc<dyn Classifier>,
    model_path: Option<String>,
}

impl InferenceEngine {
    /// Wrap a classifier, checking its inputs against the attribute catalogue
    pub fn new(classifier: impl Classifier + 'static) -> Result<Self, InferenceError> {
        check_schema(&classifier.feature_names())?;
        info!("Creating inference engine ({})", classifier.kind());
        Ok(Self {
            classifier: Arc::new(classifier),
            model_path: None,
        })
    }

    /// Load the model artifact from disk
    pub fn load(path: impl AsRef<Path>, format: ModelFormat) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading {:?} model from {}", format, path.display());

        let mut engine = match format {
            ModelFormat::Json => Self::new(LogisticRegression::load(path)?)?,
            #[cfg(feature = "onnx")]
            ModelFormat::Onnx => Self::new(crate::onnx::OnnxClassifier::load(path)?)?,
            #[cfg(not(feature = "onnx"))]
            ModelFormat::Onnx => {
                return Err(InferenceError::ModelLoadError(
                    "ONNX support not compiled in (enable the `onnx` feature)".to_string(),
                ))
            }
        };
        engine.model_path = Some(path.display().to_string());
        Ok(engine)
    }

    /// Run the classifier on a feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<InferenceResult, InferenceError> {
        let start = std::time::Instant::now();
        let prediction = self.classifier.predict(features)?;
        let latency_us = start.elapsed().as_micros() as u64;

        debug!(
            "Prediction: {} (p={:?}, latency={}us)",
            prediction.diagnosis.as_str(),
            prediction.probability,
            latency_us
        );

        Ok(InferenceResult {
            prediction,
            latency_us,
        })
    }

    /// Describe the loaded model
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            kind: self.classifier.kind(),
            path: self.model_path.clone(),
            feature_count: self.classifier.feature_names().len(),
        }
    }

    /// Get model path
    pub fn model_path(&self) -> Option<&str> {
        self.model_path.as_deref()
    }
}

/// Fail unless the model's inputs are exactly the catalogue, in order
fn check_schema(model_features: &[String]) -> Result<(), InferenceError> {
    let expected: Vec<&str> = feature_schema::feature_names().collect();
    if model_features.iter().map(String::as_str).eq(expected.iter().copied()) {
        return Ok(());
    }
    Err(InferenceError::SchemaMismatch {
        expected: expected.join(", "),
        actual: model_features.join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Diagnosis;
    use feature_schema::{feature_names, FEATURE_COUNT};

    fn names() -> Vec<String> {
        feature_names().map(String::from).collect()
    }

    #[test]
    fn test_prediction() {
        let model = LogisticRegression::new(names(), vec![0.0; FEATURE_COUNT], 2.0).unwrap();
        let engine = InferenceEngine::new(model).unwrap();

        let result = engine
            .predict(&FeatureVector::from_values([0.0; FEATURE_COUNT]))
            .unwrap();
        assert_eq!(result.prediction.diagnosis, Diagnosis::HeartDisease);
        assert_eq!(engine.info().kind, "logistic_regression");
        assert_eq!(engine.info().feature_count, FEATURE_COUNT);
    }

    #[test]
    fn test_reordered_features_rejected() {
        let mut reordered = names();
        reordered.swap(0, 1);
        let model = LogisticRegression::new(reordered, vec![0.0; FEATURE_COUNT], 0.0).unwrap();
        assert!(matches!(
            InferenceEngine::new(model),
            Err(InferenceError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_feature_rejected() {
        let mut short = names();
        short.pop();
        let model = LogisticRegression::new(short, vec![0.0; FEATURE_COUNT - 1], 0.0).unwrap();
        assert!(matches!(
            InferenceEngine::new(model),
            Err(InferenceError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = InferenceEngine::load("/nonexistent/model.json", ModelFormat::Json);
        assert!(matches!(result, Err(InferenceError::ModelLoadError(_))));
    }

    #[test]
    fn test_load_bundled_model() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/final_log_reg_model.json");
        let engine = InferenceEngine::load(path, ModelFormat::Json).unwrap();
        assert_eq!(engine.model_path(), Some(path));
    }

    #[test]
    fn test_model_format_names() {
        let format: ModelFormat = serde_json::from_str("\"onnx\"").unwrap();
        assert_eq!(format, ModelFormat::Onnx);
        assert_eq!(ModelFormat::default(), ModelFormat::Json);
    }
}
