//! ONNX Classifier using tract

use crate::classifier::{Classifier, Diagnosis, Prediction};
use crate::InferenceError;
use feature_engine::FeatureVector;
use feature_schema::{feature_names, FEATURE_COUNT};
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::info;

/// Classifier exported to ONNX (label output first, optional probabilities second)
pub struct OnnxClassifier {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxClassifier {
    /// Load and optimize an ONNX model taking a `[1, 13]` f32 input
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|m| m.with_input_fact(0, f32::fact([1, FEATURE_COUNT]).into()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;

        info!("Loaded ONNX model from {}", path.display());
        Ok(Self { plan })
    }

    fn run(&self, features: &FeatureVector) -> TractResult<Prediction> {
        let values: Vec<f32> = features.values().iter().map(|&v| v as f32).collect();
        let input: Tensor =
            tract_ndarray::Array2::from_shape_vec((1, FEATURE_COUNT), values)?.into();
        let outputs = self.plan.run(tvec!(input.into()))?;

        let labels = outputs[0].cast_to::<i64>()?;
        let label = labels.as_slice::<i64>()?.first().copied().unwrap_or(0);

        let probability = outputs
            .get(1)
            .and_then(|t| t.to_array_view::<f32>().ok())
            .and_then(|probs| probs.iter().nth(1).copied())
            .map(f64::from);

        Ok(Prediction {
            diagnosis: Diagnosis::from_label(u8::from(label != 0)),
            probability,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    // ONNX graphs carry no column names; the input shape is pinned to the
    // catalogue at load time instead.
    fn feature_names(&self) -> Vec<String> {
        feature_names().map(String::from).collect()
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, InferenceError> {
        self.run(features)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))
    }
}
